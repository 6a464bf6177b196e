use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use tokio::fs;
use walkdir::WalkDir;

use crate::{
    content::{PageInfoReader, Post, ReadData},
    layout::ImplicitLayout,
    Config, Error, Result,
};

type Reader = Box<dyn ReadData + Send + Sync>;

pub struct Site
{
    config:          Config,
    reader:          Reader,
    implicit_layout: bool,
}

impl Site
{
    pub fn new(config: Config) -> Self
    {
        let reader = Box::new(PageInfoReader::new(config.require_page_info));
        Self {
            config,
            reader,
            implicit_layout: false,
        }
    }

    pub fn config(&self) -> &Config
    {
        &self.config
    }

    /// Wrap the post reader so every post is given a layout. Call this once,
    /// while setting the site up; there's nothing to undo afterwards.
    pub fn register_implicit_layout(&mut self) -> Result<()>
    {
        if self.implicit_layout {
            return Err(Error::HookAlreadyRegistered);
        }

        // Swap in a placeholder while the current reader is moved into the wrapper
        let reader = std::mem::replace(&mut self.reader, Box::new(PageInfoReader::default()));
        self.reader = Box::new(ImplicitLayout::new(reader, self.config.default_layout.clone()));
        self.implicit_layout = true;
        log::info!(
            "Registered implicit layout \"{}\"",
            self.config.default_layout
        );
        Ok(())
    }

    pub fn parse_post(&self, source: &str, path: PathBuf) -> Result<Post>
    {
        let document = self.reader.read_data(source, &path)?;
        Ok(Post::new(path, document))
    }

    pub async fn load_post(&self, path: PathBuf) -> Result<Post>
    {
        let source = fs::read_to_string(&path).await.map_err(|e| {
            Error::Io {
                err:  e,
                path: path.clone(),
            }
        })?;
        self.parse_post(&source, path)
    }

    /// Load every post in the source directory, sorted by path.
    pub async fn load_posts(self: Arc<Self>) -> Result<Vec<Post>>
    {
        let source_files = walk_directory(&self.config.source);

        // If there's no source files we exit with an error
        if source_files.is_empty() {
            return Err(Error::MissingSourceFiles(self.config.source.clone()));
        }

        // Create a task for each
        let loads = source_files
            .into_iter()
            .map(|source_file| {
                let site = self.clone(); // Clone the Arc
                tokio::spawn(async move { site.load_post(source_file).await })
            })
            .collect::<Vec<_>>();

        let mut posts = Vec::with_capacity(loads.len());
        for load in loads {
            posts.push(load.await.map_err(|_| Error::AsyncJoin)??);
        }
        posts.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(posts)
    }
}

fn walk_directory(path: &Path) -> Vec<PathBuf>
{
    // Walk the source directory and filter the results to only include files
    // that have a markdown file extention
    WalkDir::new(path)
        .into_iter()
        .filter_map(|entry| {
            match entry {
                Ok(entry) => {
                    let extention = entry
                        .path()
                        .extension()
                        .map(|x| x.to_string_lossy().to_lowercase())
                        .unwrap_or_default();

                    let is_markdown = extention == "markdown" || extention == "md";
                    (entry.file_type().is_file() && is_markdown).then(|| entry.into_path())
                }
                Err(e) => {
                    // If the entry is an error we report it, but we continue.
                    Error::ReadSourceDir {
                        path: e.path().map(Path::to_path_buf).unwrap_or_else(|| path.to_path_buf()),
                        err:  e.to_string(),
                    }
                    .report();
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests
{
    use super::*;
    use crate::layout::DEFAULT_LAYOUT;

    fn site() -> Site
    {
        let mut site = Site::new(Config::default());
        site.register_implicit_layout().unwrap();
        site
    }

    #[test]
    fn test_registered_site_fills_layout()
    {
        let post = site()
            .parse_post(
                "```pageinfo\ntitle = \"Hello\"\n```\n",
                PathBuf::from("_posts/2013-04-09-hello.md"),
            )
            .unwrap();
        assert_eq!(post.layout(), Some(DEFAULT_LAYOUT));
        assert_eq!(post.title(), Some("Hello"));

        let post = site()
            .parse_post(
                "```pageinfo\ntitle = \"Hi\"\nlayout = \"post\"\n```\n",
                PathBuf::from("_posts/hi.md"),
            )
            .unwrap();
        assert_eq!(post.layout(), Some("post"));
    }

    #[test]
    fn test_unregistered_site_reads_as_is()
    {
        let site = Site::new(Config::default());
        let post = site
            .parse_post("```pageinfo\ntitle = \"Hello\"\n```\n", PathBuf::from("hello.md"))
            .unwrap();
        assert_eq!(post.layout(), None);
    }

    #[test]
    fn test_empty_default_layout_in_code_built_config()
    {
        let mut site = Site::new(Config {
            default_layout: String::new(),
            ..Config::default()
        });
        site.register_implicit_layout().unwrap();

        let post = site
            .parse_post("```pageinfo\ntitle = \"x\"\n```\n", PathBuf::from("x.md"))
            .unwrap();
        assert_eq!(post.layout(), Some(DEFAULT_LAYOUT));
    }

    #[test]
    fn test_hook_registers_once()
    {
        let mut site = site();
        assert!(matches!(
            site.register_implicit_layout(),
            Err(Error::HookAlreadyRegistered)
        ));

        // Still wrapped exactly once and still working
        let post = site.parse_post("", PathBuf::from("empty.md")).unwrap();
        assert_eq!(post.layout(), Some(DEFAULT_LAYOUT));
    }

    #[test]
    fn test_required_page_info_error_propagates()
    {
        let mut site = Site::new(Config {
            require_page_info: true,
            ..Config::default()
        });
        site.register_implicit_layout().unwrap();

        let err = site.parse_post("# no info", PathBuf::from("bare.md")).unwrap_err();
        assert!(matches!(err, Error::MissingPageInfo(_)));
    }

    #[tokio::test]
    async fn test_load_posts_from_directory()
    {
        let _ = env_logger::try_init();

        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        std::fs::create_dir_all(dir.join("drafts")).unwrap();
        std::fs::write(dir.join("2013-04-09-hello.md"), "```pageinfo\ntitle = \"Hello\"\n```\n").unwrap();
        std::fs::write(
            dir.join("drafts/page.markdown"),
            "```pageinfo\nlayout = \"page\"\n```\n",
        )
        .unwrap();
        std::fs::write(dir.join("notes.txt"), "not a post").unwrap();

        let mut site = Site::new(Config {
            source: dir.clone(),
            ..Config::default()
        });
        site.register_implicit_layout().unwrap();

        let posts = Arc::new(site).load_posts().await.unwrap();
        let layouts: Vec<(&str, Option<&str>)> = posts.iter().map(|p| (p.slug.as_str(), p.layout())).collect();
        assert_eq!(layouts, [("hello", Some("single")), ("page", Some("page"))]);
    }

    #[tokio::test]
    async fn test_load_posts_from_empty_directory()
    {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_path_buf();
        let site = Arc::new(Site::new(Config {
            source: dir.clone(),
            ..Config::default()
        }));

        assert!(matches!(
            site.load_posts().await,
            Err(Error::MissingSourceFiles(path)) if path == dir
        ));
    }

    #[tokio::test]
    async fn test_load_missing_post()
    {
        let err = site().load_post(PathBuf::from("/definitely/not/here.md")).await.unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
