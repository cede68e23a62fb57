//! Import command implementation

use std::path::Path;

use anyhow::{Context as _, Result};

use tense_master::store::ContentPack;

use super::Context;

pub async fn import_command(ctx: &Context, file: &Path) -> Result<()> {
    let pack = ContentPack::load(file)?;
    let summary = ctx
        .store
        .import(&pack)
        .with_context(|| format!("Failed to import {}", file.display()))?;

    println!(
        "Imported {} courses, {} questions, {} cloze stories, {} detective texts, {} identification sentences",
        summary.courses, summary.questions, summary.cloze, summary.detective, summary.identification
    );
    Ok(())
}
