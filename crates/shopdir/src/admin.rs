//! `shopdir admin`: edit a bundled data file from the command line.
//!
//! Each invocation opens the data file, applies one change, and writes the
//! whole set to `--out` (or stdout). The source file is never rewritten in
//! place unless `--out` points at it.

use crate::output;
use anyhow::Context;
use clap::{Args, Subcommand};
use log::info;
use shopdir::core::{ShopDraft, ShopEditor, UploadedImage};
use std::path::Path;

#[derive(Debug, Subcommand)]
pub(crate) enum AdminCommand {
    /// Add a shop with a freshly assigned id
    Add {
        #[command(flatten)]
        fields: ShopFields,
        /// Image file to attach (repeatable); only its name is recorded
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Replace fields of an existing shop
    Edit {
        id: String,
        #[command(flatten)]
        fields: ShopFields,
        #[arg(long = "image")]
        images: Vec<String>,
    },
    /// Remove a shop
    Delete { id: String },
    /// List shops matching name, type, or tags
    List {
        #[arg(long)]
        filter: Option<String>,
    },
    /// Counts by category and type
    Stats,
    /// Write the data set unchanged (normalized)
    Export,
}

/// Form fields; unset flags keep the current value when editing.
#[derive(Debug, Default, Args)]
pub(crate) struct ShopFields {
    #[arg(long)]
    pub(crate) category: Option<String>,
    #[arg(long = "type")]
    pub(crate) shop_type: Option<String>,
    #[arg(long)]
    pub(crate) name: Option<String>,
    #[arg(long)]
    pub(crate) address: Option<String>,
    #[arg(long)]
    pub(crate) wechat: Option<String>,
    #[arg(long)]
    pub(crate) phone: Option<String>,
    #[arg(long)]
    pub(crate) description: Option<String>,
    #[arg(long)]
    pub(crate) services: Option<String>,
    #[arg(long)]
    pub(crate) open_time: Option<String>,
    #[arg(long)]
    pub(crate) tags: Option<String>,
    #[arg(long)]
    pub(crate) menu: Option<String>,
}

impl ShopFields {
    /// Overlay the set fields onto a draft.
    pub(crate) fn apply(self, draft: &mut ShopDraft) {
        let targets = [
            (self.category, &mut draft.category),
            (self.shop_type, &mut draft.shop_type),
            (self.name, &mut draft.name),
            (self.address, &mut draft.address),
            (self.wechat, &mut draft.wechat),
            (self.phone, &mut draft.phone),
            (self.description, &mut draft.description),
            (self.services, &mut draft.services),
            (self.open_time, &mut draft.open_time),
            (self.tags, &mut draft.tags),
            (self.menu, &mut draft.menu),
        ];
        for (value, target) in targets {
            if let Some(value) = value {
                *target = value;
            }
        }
    }
}

fn uploads(images: &[String]) -> Vec<UploadedImage> {
    images
        .iter()
        .map(|image| {
            let name = Path::new(image)
                .file_name()
                .map(|name| name.to_string_lossy().to_string())
                .unwrap_or_else(|| image.clone());
            UploadedImage::from_file_name(name)
        })
        .collect()
}

pub(crate) fn run(
    data: &Path,
    out: Option<&Path>,
    command: AdminCommand,
    json: bool,
) -> anyhow::Result<()> {
    let mut editor = ShopEditor::open(data)
        .with_context(|| format!("failed to open {}", data.display()))?;

    match command {
        AdminCommand::List { filter } => {
            let shops: Vec<_> = editor
                .list(filter.as_deref().unwrap_or(""))
                .into_iter()
                .cloned()
                .collect();
            return output::records(&shops, json);
        }
        AdminCommand::Stats => return output::stats(&editor.stats(), json),
        AdminCommand::Add { fields, images } => {
            let mut draft = ShopDraft::default();
            fields.apply(&mut draft);
            let outcome = editor.submit(draft, &uploads(&images))?;
            info!("added {}", outcome.id());
        }
        AdminCommand::Edit { id, fields, images } => {
            let mut draft = editor.begin_edit(&id)?;
            fields.apply(&mut draft);
            let outcome = editor.submit(draft, &uploads(&images))?;
            info!("updated {}", outcome.id());
        }
        AdminCommand::Delete { id } => {
            let removed = editor.delete(&id)?;
            info!("deleted {} ({})", removed.id, removed.name);
        }
        AdminCommand::Export => {}
    }

    match out {
        Some(path) => editor
            .export_to(path)
            .with_context(|| format!("failed to write {}", path.display()))?,
        None => println!("{}", editor.export_json()?),
    }
    Ok(())
}
