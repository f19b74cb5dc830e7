//! Emits a commit-hash/version banner via `shadow-rs`, read back by
//! `src/lib.rs` at compile time and surfaced through the CLI tools'
//! `--version` output.

fn main() -> shadow_rs::SdResult<()> {
    shadow_rs::new()
}
