//! Template rendering with per-view composers.
//!
//! Templates are loaded from a directory of `.hbs` files and addressed by their path
//! relative to that directory (`user/profile`, `notes/basics/routing`). Pages inherit
//! from `master` through handlebars partial blocks: a page opens `{{#> master}}`
//! and fills the `content` slot with an inline partial.
//!
//! A [`ViewComposer`] registered for a view name runs immediately before that view
//! renders and may add keys to its data. Composers run on every render; nothing they
//! produce is cached.

use std::{collections::HashMap, path::Path, sync::Arc};

use async_trait::async_trait;
use handlebars::{DirectorySourceOptions, Handlebars, TemplateError};
use serde_json::{Map, Value};
use tracing::debug;

use crate::error::WebError;

#[async_trait]
pub trait ViewComposer: Send + Sync {
    async fn compose(&self, data: &mut Map<String, Value>) -> Result<(), WebError>;
}

pub struct Views {
    templates: Handlebars<'static>,
    composers: HashMap<String, Vec<Arc<dyn ViewComposer>>>,
}

impl Views {
    pub fn new(templates: Handlebars<'static>) -> Self {
        Self {
            templates,
            composers: HashMap::new(),
        }
    }

    /// Registers every `.hbs` file under `dir`.
    pub fn from_directory(dir: impl AsRef<Path>, dev_mode: bool) -> Result<Self, TemplateError> {
        let mut templates = Handlebars::new();
        templates.set_dev_mode(dev_mode);
        templates.register_templates_directory(dir, DirectorySourceOptions::default())?;

        Ok(Self::new(templates))
    }

    pub fn composer<C>(&mut self, view: &str, composer: C)
    where
        C: ViewComposer + 'static,
    {
        self.composers
            .entry(view.to_string())
            .or_default()
            .push(Arc::new(composer));
    }

    pub async fn render(&self, name: &str, data: Value) -> Result<String, WebError> {
        let mut context = match data {
            Value::Object(map) => map,
            Value::Null => Map::new(),
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };

        if let Some(composers) = self.composers.get(name) {
            debug!("running {} composer(s) for {name}", composers.len());
            for composer in composers {
                composer.compose(&mut context).await?;
            }
        }

        Ok(self.templates.render(name, &Value::Object(context))?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicI64, Ordering};

    use serde_json::json;

    use super::*;

    struct Counter(AtomicI64);

    #[async_trait]
    impl ViewComposer for Counter {
        async fn compose(&self, data: &mut Map<String, Value>) -> Result<(), WebError> {
            let n = self.0.fetch_add(1, Ordering::SeqCst) + 1;
            data.insert("count".to_string(), json!(n));
            Ok(())
        }
    }

    struct Broken;

    #[async_trait]
    impl ViewComposer for Broken {
        async fn compose(&self, _data: &mut Map<String, Value>) -> Result<(), WebError> {
            Err(WebError::Database(sqlx::Error::PoolClosed))
        }
    }

    fn views() -> Views {
        let mut templates = Handlebars::new();
        templates
            .register_template_string("master", "<main>{{#> content}}{{/content}}</main>")
            .unwrap();
        templates
            .register_template_string(
                "profile",
                "{{#> master}}{{#*inline \"content\"}}{{name}}:{{count}}{{/inline}}{{/master}}",
            )
            .unwrap();
        templates
            .register_template_string("plain", "{{name}}:{{count}}")
            .unwrap();
        Views::new(templates)
    }

    #[tokio::test]
    async fn composer_runs_on_every_render_of_its_view() {
        let mut views = views();
        views.composer("profile", Counter(AtomicI64::new(0)));

        let first = views.render("profile", json!({"name": "joey"})).await.unwrap();
        let second = views.render("profile", json!({"name": "joey"})).await.unwrap();

        assert_eq!(first, "<main>joey:1</main>");
        assert_eq!(second, "<main>joey:2</main>");
    }

    #[tokio::test]
    async fn composer_is_scoped_to_one_view() {
        let mut views = views();
        views.composer("profile", Counter(AtomicI64::new(0)));

        let out = views.render("plain", json!({"name": "joey"})).await.unwrap();
        assert_eq!(out, "joey:");
    }

    #[tokio::test]
    async fn composer_failure_aborts_render() {
        let mut views = views();
        views.composer("plain", Broken);

        let err = views.render("plain", Value::Null).await.unwrap_err();
        assert!(matches!(err, WebError::Database(_)));
    }

    #[tokio::test]
    async fn missing_template_is_a_render_error() {
        let err = views().render("nope", Value::Null).await.unwrap_err();
        assert!(matches!(err, WebError::Render(_)));
    }
}
