//! Gives every post a layout.
//!
//! Posts that leave `layout` out of their page info, or set it to an empty
//! string or `false`, are rendered with [`DEFAULT_LAYOUT`] (or whatever
//! `default_layout` is configured to). The fill happens after the wrapped
//! reader has parsed the post, and only if it succeeded.

use std::path::Path;

use crate::{
    content::{Attributes, Document, ReadData},
    Result,
};

pub const LAYOUT_KEY: &str = "layout";
pub const DEFAULT_LAYOUT: &str = "single";

/// Sets `layout` to `default` when it is missing or falsy. Returns whether
/// the attributes were changed.
pub fn fill_layout(data: &mut Attributes, default: &str) -> bool
{
    let falsy = match data.get(LAYOUT_KEY) {
        None => true,
        Some(toml::Value::String(layout)) => layout.is_empty(),
        Some(toml::Value::Boolean(layout)) => !layout,
        Some(_) => false,
    };

    if falsy {
        data.insert(LAYOUT_KEY.to_string(), toml::Value::String(default.to_string()));
    }
    falsy
}

/// Wraps a [`ReadData`] so that whatever it reads comes out with a layout.
#[derive(Debug, Clone)]
pub struct ImplicitLayout<R>
{
    inner:   R,
    default: String,
}

impl<R: ReadData> ImplicitLayout<R>
{
    /// An empty `default` falls back to [`DEFAULT_LAYOUT`].
    pub fn new(inner: R, default: impl Into<String>) -> Self
    {
        let mut default = default.into();
        if default.is_empty() {
            log::warn!("Empty default layout, using \"{DEFAULT_LAYOUT}\"");
            default = String::from(DEFAULT_LAYOUT);
        }

        Self { inner, default }
    }

    pub fn into_inner(self) -> R
    {
        self.inner
    }
}

impl<R: ReadData> ReadData for ImplicitLayout<R>
{
    fn read_data(&self, source: &str, path: &Path) -> Result<Document>
    {
        let mut document = self.inner.read_data(source, path)?;
        if fill_layout(&mut document.data, &self.default) {
            log::debug!("{}: using implicit layout \"{}\"", path.display(), self.default);
        }
        Ok(document)
    }
}
