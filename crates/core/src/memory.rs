//! In-process [`TemplateRepository`] used by tests and the server's memory
//! storage mode.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::CoreError;
use crate::repository::TemplateRepository;
use crate::template::Template;
use crate::types::{TemplateId, UserId};

/// Map-backed template store. Counts `save` and `delete` calls.
#[derive(Debug, Default)]
pub struct InMemoryTemplateRepo {
    templates: RwLock<HashMap<TemplateId, Template>>,
    save_calls: AtomicUsize,
    delete_calls: AtomicUsize,
}

impl InMemoryTemplateRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a template without counting it as a `save` call.
    pub async fn seed(&self, template: Template) {
        self.templates.write().await.insert(template.id(), template);
    }

    pub fn save_calls(&self) -> usize {
        self.save_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub async fn len(&self) -> usize {
        self.templates.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.templates.read().await.is_empty()
    }
}

/// Most recently updated first.
fn newest_first(mut items: Vec<Template>) -> Vec<Template> {
    items.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
    items
}

#[async_trait]
impl TemplateRepository for InMemoryTemplateRepo {
    async fn find_by_id(&self, id: &TemplateId) -> Result<Option<Template>, CoreError> {
        Ok(self.templates.read().await.get(id).cloned())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Template>, CoreError> {
        let items = self
            .templates
            .read()
            .await
            .values()
            .filter(|t| t.is_owned_by(user_id))
            .cloned()
            .collect();
        Ok(newest_first(items))
    }

    async fn find_public(&self) -> Result<Vec<Template>, CoreError> {
        let items = self
            .templates
            .read()
            .await
            .values()
            .filter(|t| t.is_public())
            .cloned()
            .collect();
        Ok(newest_first(items))
    }

    async fn save(&self, template: &Template) -> Result<(), CoreError> {
        self.save_calls.fetch_add(1, Ordering::SeqCst);
        self.templates
            .write()
            .await
            .insert(template.id(), template.clone());
        Ok(())
    }

    async fn delete(&self, id: &TemplateId) -> Result<(), CoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.templates.write().await.remove(id);
        Ok(())
    }
}
