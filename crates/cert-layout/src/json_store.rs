//! JSON file template store
//!
//! Keeps one `<id>.json` file per template in a directory and acts as the
//! template loader and as both mutation sinks. Every commit rewrites the
//! template file.

use std::path::{Path, PathBuf};

use log::debug;
use tokio::sync::Mutex;

use crate::ports::{BackgroundMutationSink, FieldMutationSink, TemplateLoader};
use crate::types::*;

#[derive(Debug)]
pub struct JsonTemplateStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles on template files
    write_lock: Mutex<()>,
}

impl JsonTemplateStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, id: TemplateId) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// Read a template file
    pub async fn read(&self, id: TemplateId) -> Result<Template> {
        let path = self.path_for(id);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Err(LayoutError::TemplateNotFound(id));
            }
            Err(err) => return Err(err.into()),
        };
        let mut template: Template = serde_json::from_slice(&bytes).map_err(|e| {
            LayoutError::Config(format!("Failed to parse template {}: {}", path.display(), e))
        })?;
        template.id = id;
        Ok(template)
    }

    /// Write a template file, creating the directory if needed
    pub async fn write(&self, template: &Template) -> Result<()> {
        let json = serde_json::to_string_pretty(template)
            .map_err(|e| LayoutError::Config(format!("Failed to serialize template: {}", e)))?;
        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(self.path_for(template.id), json).await?;
        Ok(())
    }

    async fn update<F>(&self, id: TemplateId, apply: F) -> Result<()>
    where
        F: FnOnce(&mut Template) -> Result<()>,
    {
        let _guard = self.write_lock.lock().await;
        let mut template = self.read(id).await?;
        apply(&mut template)?;
        self.write(&template).await
    }
}

impl TemplateLoader for JsonTemplateStore {
    async fn load_template(&self, id: TemplateId) -> Result<Template> {
        self.read(id).await
    }
}

impl FieldMutationSink for JsonTemplateStore {
    async fn commit_position(
        &self,
        template: TemplateId,
        field: FieldId,
        x: f32,
        y: f32,
    ) -> Result<()> {
        debug!("Writing position of field {} in template {}", field, template);
        self.update(template, |t| {
            let target = t.field_mut(field).ok_or(LayoutError::UnknownField(field))?;
            target.position_x = x;
            target.position_y = y;
            Ok(())
        })
        .await
    }

    async fn commit_width(&self, template: TemplateId, field: FieldId, width: f32) -> Result<()> {
        debug!("Writing width of field {} in template {}", field, template);
        self.update(template, |t| {
            let target = t.field_mut(field).ok_or(LayoutError::UnknownField(field))?;
            target.width = Some(width);
            Ok(())
        })
        .await
    }
}

impl BackgroundMutationSink for JsonTemplateStore {
    async fn commit_background(
        &self,
        template: TemplateId,
        alignment: BackgroundAlignment,
    ) -> Result<()> {
        self.update(template, |t| {
            t.background = alignment;
            Ok(())
        })
        .await
    }
}
