//! Collaborator interfaces
//!
//! The engine loads templates and makes its changes durable only through
//! these traits. Calls are awaited by the editor so that unsaved flags are
//! cleared only once a call has succeeded.
#![allow(async_fn_in_trait)]

use crate::render::PrintJob;
use crate::resolve::{DataRecord, ResolvedValue};
use crate::types::{BackgroundAlignment, FieldId, Result, Template, TemplateField, TemplateId};

/// Supplies templates by id
pub trait TemplateLoader {
    async fn load_template(&self, id: TemplateId) -> Result<Template>;
}

/// Makes field geometry durable
pub trait FieldMutationSink {
    async fn commit_position(&self, template: TemplateId, field: FieldId, x: f32, y: f32)
    -> Result<()>;

    async fn commit_width(&self, template: TemplateId, field: FieldId, width: f32) -> Result<()>;
}

/// Makes background alignment durable
pub trait BackgroundMutationSink {
    async fn commit_background(
        &self,
        template: TemplateId,
        alignment: BackgroundAlignment,
    ) -> Result<()>;
}

/// Produces the text shown for a field on a given record
pub trait FieldValueResolver {
    fn resolve(&self, field: &TemplateField, record: &DataRecord) -> ResolvedValue;
}

/// Prints or exports a committed layout
pub trait PrintTrigger {
    async fn print(&self, job: &PrintJob) -> Result<()>;
}
