//! In-memory admin editor over a record set.
//!
//! Nothing here is durable: changes live in the editor until
//! [`ShopEditor::export_to`] writes the whole set as pretty-printed JSON,
//! which then replaces the bundled data file by hand.

use crate::error::EditorError;
use crate::normalize::normalize_value;
use crate::source::strip_bom;
use crate::stats::CatalogStats;
use chrono::{Local, NaiveDate};
use log::{debug, info};
use serde_json::Value;
use shopdir_protocol::{Category, Contact, ShopRecord};
use std::path::Path;

/// Display format of `last_update`.
pub const LAST_UPDATE_FORMAT: &str = "%Y/%m/%d";

/// Form input for creating or editing a record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShopDraft {
    pub category: String,
    pub shop_type: String,
    pub name: String,
    pub address: String,
    pub wechat: String,
    pub phone: String,
    pub description: String,
    pub services: String,
    pub open_time: String,
    pub tags: String,
    pub menu: String,
    /// Image filenames already attached to the record.
    pub images: Vec<String>,
}

impl ShopDraft {
    /// Prefill a draft from an existing record.
    pub fn from_record(record: &ShopRecord) -> Self {
        Self {
            category: record.category.as_str().to_string(),
            shop_type: record.shop_type.clone(),
            name: record.name.clone(),
            address: record.address.clone(),
            wechat: record.contact.wechat.clone(),
            phone: record.contact.phone.clone(),
            description: record.description.clone(),
            services: record.services.clone(),
            open_time: record.open_time.clone(),
            tags: record.tags.clone(),
            menu: record.menu.clone(),
            images: record.images.clone(),
        }
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("category", &self.category),
            ("type", &self.shop_type),
            ("name", &self.name),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(field, _)| field)
        .collect()
    }
}

/// A file picked for upload. Only its name and declared type are used; the
/// bytes are placed on disk separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedImage {
    pub name: String,
    pub content_type: String,
}

impl UploadedImage {
    pub fn new(name: impl Into<String>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content_type: content_type.into(),
        }
    }

    /// Guess the content type from the file extension.
    pub fn from_file_name(name: impl Into<String>) -> Self {
        let name = name.into();
        let extension = name
            .rsplit_once('.')
            .map(|(_, extension)| extension.to_ascii_lowercase())
            .unwrap_or_default();
        let content_type = match extension.as_str() {
            "jpg" | "jpeg" => "image/jpeg",
            "png" => "image/png",
            "webp" => "image/webp",
            "gif" => "image/gif",
            "bmp" => "image/bmp",
            "svg" => "image/svg+xml",
            _ => "application/octet-stream",
        };
        Self::new(name, content_type)
    }

    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Result of a successful submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(String),
    Updated(String),
}

impl SubmitOutcome {
    pub fn id(&self) -> &str {
        match self {
            SubmitOutcome::Created(id) | SubmitOutcome::Updated(id) => id,
        }
    }
}

/// Stored filename for an upload: `<sequence:03>-<position>.<extension>`.
///
/// `position` is 1-based. The extension is whatever follows the last `.` of
/// the original name, or the whole name when it has no dot.
pub fn image_file_name(sequence: u64, position: usize, original_name: &str) -> String {
    let extension = original_name.rsplit('.').next().unwrap_or(original_name);
    format!("{sequence:03}-{position}.{extension}")
}

/// The admin editor's working copy of the record set.
#[derive(Debug, Clone, Default)]
pub struct ShopEditor {
    records: Vec<ShopRecord>,
    editing: Option<String>,
}

impl ShopEditor {
    pub fn from_records(records: Vec<ShopRecord>) -> Self {
        Self {
            records,
            editing: None,
        }
    }

    /// Parse a bundled JSON array; entries are normalized like loader input.
    pub fn from_json_str(contents: &str) -> Result<Self, EditorError> {
        let values: Vec<Value> = serde_json::from_str(strip_bom(contents))?;
        Ok(Self::from_records(
            values.iter().map(normalize_value).collect(),
        ))
    }

    pub fn open(path: impl AsRef<Path>) -> Result<Self, EditorError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let editor = Self::from_json_str(&contents)?;
        debug!(
            "opened {} shops from {}",
            editor.records.len(),
            path.display()
        );
        Ok(editor)
    }

    pub fn records(&self) -> &[ShopRecord] {
        &self.records
    }

    pub fn get(&self, id: &str) -> Option<&ShopRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    /// Id of the record currently being edited, if any.
    pub fn editing(&self) -> Option<&str> {
        self.editing.as_deref()
    }

    /// Next free sequence number for a category.
    pub fn next_sequence(&self, category: &Category) -> Result<u64, EditorError> {
        let prefix = category
            .prefix()
            .ok_or_else(|| EditorError::UnknownCategory(category.as_str().to_string()))?;
        let highest = self
            .records
            .iter()
            .filter_map(|record| record.id.strip_prefix(prefix)?.strip_prefix('_'))
            .filter_map(|suffix| suffix.parse::<u64>().ok())
            .max();
        match highest {
            None => Ok(1),
            Some(highest) => highest
                .checked_add(1)
                .ok_or_else(|| EditorError::IdsExhausted(prefix.to_string())),
        }
    }

    /// Next fresh id for a category, e.g. `chef_004`.
    pub fn next_id(&self, category: &Category) -> Result<String, EditorError> {
        let sequence = self.next_sequence(category)?;
        let prefix = category.prefix().unwrap_or_default();
        Ok(format!("{prefix}_{sequence:03}"))
    }

    /// Enter edit mode for a record and return its prefilled draft.
    pub fn begin_edit(&mut self, id: &str) -> Result<ShopDraft, EditorError> {
        let draft = self
            .get(id)
            .map(ShopDraft::from_record)
            .ok_or_else(|| EditorError::UnknownShop(id.to_string()))?;
        self.editing = Some(id.to_string());
        Ok(draft)
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Save a draft, dated today.
    pub fn submit(
        &mut self,
        draft: ShopDraft,
        uploads: &[UploadedImage],
    ) -> Result<SubmitOutcome, EditorError> {
        self.submit_on(draft, uploads, Local::now().date_naive())
    }

    /// Save a draft: a new record when not editing, otherwise a full
    /// replacement of the edited record at its current position.
    ///
    /// On error nothing is changed, including edit mode.
    pub fn submit_on(
        &mut self,
        draft: ShopDraft,
        uploads: &[UploadedImage],
        date: NaiveDate,
    ) -> Result<SubmitOutcome, EditorError> {
        let missing = draft.missing_fields();
        if !missing.is_empty() {
            return Err(EditorError::MissingFields(missing));
        }
        let category = Category::parse(draft.category.trim())
            .ok_or_else(|| EditorError::UnknownCategory(draft.category.clone()))?;
        if let Some(upload) = uploads.iter().find(|upload| !upload.is_image()) {
            return Err(EditorError::NotAnImage(upload.name.clone()));
        }

        let (id, position, sequence) = match self.editing.as_deref() {
            Some(id) => {
                let position = self
                    .records
                    .iter()
                    .position(|record| record.id == id)
                    .ok_or_else(|| EditorError::UnknownShop(id.to_string()))?;
                let sequence = match self.records[position].sequence() {
                    Some(sequence) => sequence,
                    None => self.next_sequence(&category)?,
                };
                (id.to_string(), Some(position), sequence)
            }
            None => (self.next_id(&category)?, None, self.next_sequence(&category)?),
        };

        let mut images = draft.images;
        let first_position = images.len() + 1;
        images.extend(uploads.iter().enumerate().map(|(index, upload)| {
            image_file_name(sequence, first_position + index, &upload.name)
        }));

        let record = ShopRecord {
            id: id.clone(),
            category,
            shop_type: draft.shop_type.trim().to_string(),
            name: draft.name.trim().to_string(),
            address: draft.address,
            contact: Contact {
                wechat: draft.wechat,
                phone: draft.phone,
            },
            description: draft.description,
            services: draft.services,
            open_time: draft.open_time,
            images,
            menu: draft.menu,
            tags: draft.tags,
            last_update: date.format(LAST_UPDATE_FORMAT).to_string(),
        };

        match position {
            Some(position) => {
                self.records[position] = record;
                self.editing = None;
                debug!("updated shop {id}");
                Ok(SubmitOutcome::Updated(id))
            }
            None => {
                self.records.push(record);
                debug!("created shop {id}");
                Ok(SubmitOutcome::Created(id))
            }
        }
    }

    /// Remove a record, leaving edit mode if it was the one being edited.
    pub fn delete(&mut self, id: &str) -> Result<ShopRecord, EditorError> {
        let position = self
            .records
            .iter()
            .position(|record| record.id == id)
            .ok_or_else(|| EditorError::UnknownShop(id.to_string()))?;
        if self.editing.as_deref() == Some(id) {
            self.editing = None;
        }
        Ok(self.records.remove(position))
    }

    /// Records whose name, type, or tags contain `filter`, ignoring case.
    pub fn list(&self, filter: &str) -> Vec<&ShopRecord> {
        let needle = filter.trim().to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                needle.is_empty()
                    || [&record.name, &record.shop_type, &record.tags]
                        .iter()
                        .any(|field| field.to_lowercase().contains(&needle))
            })
            .collect()
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats::collect(&self.records)
    }

    /// The full set as JSON with two-space indentation.
    pub fn export_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(&self.records)?)
    }

    pub fn export_to(&self, path: impl AsRef<Path>) -> Result<(), EditorError> {
        let path = path.as_ref();
        std::fs::write(path, self.export_json()?)?;
        info!("exported {} shops to {}", self.records.len(), path.display());
        Ok(())
    }
}
