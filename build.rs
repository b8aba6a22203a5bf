use std::error::Error;
use vergen_gitcl::{Emitter, GitclBuilder};

/// Emits the git describe string used in the version.
/// # Errors
/// * if `git` is not installed
/// * if there is no .git folder, e.g. when building from a source tarball
fn emit_git() -> Result<(), Box<dyn Error>> {
    let gitcl = GitclBuilder::default()
        .describe(false, true, Some("NoTagPatternMatchesThis"))
        .build()?;

    Emitter::default()
        .fail_on_error()
        .add_instructions(&gitcl)?
        .emit()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    if emit_git().is_err() {
        // fall back to a user provided value, or "unknown"
        let git_desc = option_env!("CALLCOMPARE_GIT_DESCRIBE")
            .unwrap_or("unknown");
        println!("cargo:rustc-env=VERGEN_GIT_DESCRIBE={git_desc}");
    }

    println!("cargo:rerun-if-changed=Cargo.toml");
    println!("cargo:rerun-if-changed=src");
    Ok(())
}
