//! Page and meta templates.

use minijinja::{AutoEscape, Environment, Value, context};

use crate::error::RenderError;

/// Page template plus the meta template rendered into it.
///
/// Both are `minijinja` sources rendered without auto-escaping: values put
/// into them are already markup.
#[derive(Clone, Debug, Default)]
pub struct DocumentTemplate {
    page: String,
    meta: String,
}

impl DocumentTemplate {
    #[must_use]
    pub fn new(page: impl Into<String>, meta: impl Into<String>) -> Self {
        Self {
            page: page.into(),
            meta: meta.into(),
        }
    }

    /// Render the meta template, then the page template with the result as `meta`.
    pub(crate) fn render(&self, fields: Value) -> Result<String, RenderError> {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.add_template("meta", &self.meta)?;
        env.add_template("page", &self.page)?;

        let meta = env.get_template("meta")?.render(&fields)?;
        let page = env
            .get_template("page")?
            .render(context! { meta => meta, ..fields })?;
        Ok(page)
    }
}
