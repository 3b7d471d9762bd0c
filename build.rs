use anyhow::Result;
use vergen::EmitBuilder;

// Emits VERGEN_GIT_SHA / VERGEN_BUILD_DATE for `flight_segment --version`.
fn main() -> Result<()> {
    EmitBuilder::builder()
        .git_sha(true)
        .build_date()
        .emit()?;
    Ok(())
}
