use std::{path::PathBuf, sync::Arc};

use implicit_layout::{site::Site, Config, Error, Result, DESC, NAME};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = NAME,
    about = DESC,
)]
enum Options
{
    /// Initialize a new project
    Init
    {
        /// The project directory
        #[structopt(default_value = ".")]
        directory: PathBuf,
    },

    /// Load a single post and print its attributes
    Show
    {
        /// The post to load
        post: PathBuf,

        /// Provide an alternate config file path
        #[structopt(long = "config", default_value = Config::DEFAULT_CONFIG_FILE)]
        config_path: PathBuf,
    },

    /// Load every post and print the layout each one ends up with
    List
    {
        /// Provide an alternate config file path
        #[structopt(long = "config", default_value = Config::DEFAULT_CONFIG_FILE)]
        config_path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()>
{
    env_logger::init();

    let options = Options::from_args();
    match options {
        Options::Init { directory } => Error::unwrap_gracefully(implicit_layout::init(&directory, Config::default()).await),
        Options::Show { post, config_path } => {
            let site = Error::unwrap_gracefully(load_site(&config_path));
            let post = Error::unwrap_gracefully(site.load_post(post).await);
            let attributes = toml::to_string_pretty(&post.data).map_err(|e| Error::ConfigParse(e.to_string()));
            print!("{}", Error::unwrap_gracefully(attributes));
        }
        Options::List { config_path } => {
            let site = Arc::new(Error::unwrap_gracefully(load_site(&config_path)));
            for post in Error::unwrap_gracefully(site.load_posts().await) {
                println!("{}\t{}", post.path.display(), post.layout().unwrap_or_default());
            }
        }
    };

    Ok(())
}

/// Read the config and set up a site with the implicit layout registered.
fn load_site(config_path: &PathBuf) -> Result<Site>
{
    let mut config = Config::from_toml(config_path)?;

    // Paths in the config are relative to the config file
    if let Some(root) = config_path.parent() {
        config.source = root.join(&config.source);
        config.dest = root.join(&config.dest);
        config.pipeline = root.join(&config.pipeline);
    }

    let mut site = Site::new(config);
    site.register_implicit_layout()?;
    Ok(site)
}
