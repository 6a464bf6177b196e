use std::{
    ops::Range,
    path::{Path, PathBuf},
};

use chrono::NaiveDate;
use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag};

use crate::{Error, Result};

/// The attributes of a post, taken from its `pageinfo` block.
pub type Attributes = toml::Table;

/// What the parse step produces for a single source file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document
{
    pub data: Attributes,
    pub body: String,
}

/// Turns the raw source of a post into a [`Document`].
pub trait ReadData
{
    fn read_data(&self, source: &str, path: &Path) -> Result<Document>;
}

impl<R: ReadData + ?Sized> ReadData for Box<R>
{
    fn read_data(&self, source: &str, path: &Path) -> Result<Document>
    {
        (**self).read_data(source, path)
    }
}

/// Reads posts whose front matter lives in a fenced code block tagged
/// `pageinfo`, written as TOML.
#[derive(Debug, Clone, Default)]
pub struct PageInfoReader
{
    require_page_info: bool,
}

impl PageInfoReader
{
    pub const CODE_BLOCK_IDENTIFIER: &str = "pageinfo";

    pub fn new(require_page_info: bool) -> Self
    {
        Self { require_page_info }
    }

    /// Finds the `pageinfo` block, returning its contents and the byte range
    /// the whole block (fences included) occupies in `source`.
    fn find_page_info(source: &str) -> Option<(String, Range<usize>)>
    {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        let mut block: Option<(String, Range<usize>)> = None;
        for (event, range) in Parser::new_ext(source, options).into_offset_iter() {
            match event {
                Event::Start(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang)))
                    if lang.as_ref() == Self::CODE_BLOCK_IDENTIFIER =>
                {
                    block = Some((String::new(), range));
                }
                Event::Text(ref text) => {
                    if let Some((contents, _)) = block.as_mut() {
                        contents.push_str(text);
                    }
                }
                Event::End(Tag::CodeBlock(CodeBlockKind::Fenced(ref lang)))
                    if lang.as_ref() == Self::CODE_BLOCK_IDENTIFIER =>
                {
                    return block;
                }
                _ => {}
            }
        }

        block
    }
}

impl ReadData for PageInfoReader
{
    fn read_data(&self, source: &str, path: &Path) -> Result<Document>
    {
        let Some((unparsed_page_info, range)) = Self::find_page_info(source)
        else {
            if self.require_page_info {
                return Err(Error::MissingPageInfo(path.to_path_buf()));
            }
            log::debug!("{}: no page info, reading without attributes", path.display());
            return Ok(Document {
                data: Attributes::new(),
                body: source.trim().to_string(),
            });
        };

        let data = toml::from_str::<Attributes>(&unparsed_page_info).map_err(|e| {
            Error::ParsePageInfo {
                err:  e.to_string(),
                path: path.to_path_buf(),
            }
        })?;

        // Everything but the pageinfo block is the post body. The text on
        // either side stays in separate blocks.
        let before = source[..range.start].trim();
        let after = source[range.end..].trim();
        let body = match (before.is_empty(), after.is_empty()) {
            (false, false) => format!("{before}\n\n{after}"),
            (true, _) => after.to_string(),
            (false, true) => before.to_string(),
        };

        Ok(Document { data, body })
    }
}

/// A loaded post.
#[derive(Debug, Clone, PartialEq)]
pub struct Post
{
    pub path: PathBuf,

    /// The file stem with any date prefix removed.
    pub slug: String,

    /// The date in a `YYYY-MM-DD-slug.md` file name.
    pub date: Option<NaiveDate>,

    pub data: Attributes,
    pub body: String,
}

impl Post
{
    pub fn new(path: PathBuf, document: Document) -> Self
    {
        let stem = path
            .file_stem()
            .map(|x| x.to_string_lossy().to_string())
            .unwrap_or_default();
        let (date, slug) = split_date_prefix(&stem);

        Self {
            slug: slug.to_string(),
            date,
            path,
            data: document.data,
            body: document.body,
        }
    }

    pub fn layout(&self) -> Option<&str>
    {
        self.data.get("layout").and_then(toml::Value::as_str)
    }

    pub fn title(&self) -> Option<&str>
    {
        self.data.get("title").and_then(toml::Value::as_str)
    }
}

fn split_date_prefix(stem: &str) -> (Option<NaiveDate>, &str)
{
    let (Some(prefix), Some(rest)) = (stem.get(..10), stem.get(10..))
    else {
        return (None, stem);
    };

    match (NaiveDate::parse_from_str(prefix, "%Y-%m-%d"), rest.strip_prefix('-')) {
        (Ok(date), Some(slug)) if !slug.is_empty() => (Some(date), slug),
        _ => (None, stem),
    }
}
