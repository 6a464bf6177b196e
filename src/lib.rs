use std::path::Path;

pub mod config;
pub mod content;
pub mod defaults;
pub mod error;
pub mod layout;
pub mod pipeline;
pub mod site;
pub use config::*;
pub use error::*;

pub const NAME: &str = "ImplicitLayout";
pub const DESC: &str = "Loads blog posts and guarantees every one of them names a layout";

/// Initialize a directiory with the defualt config, asset pipeline and a
/// starter post. Does nothing if a config file is already there.
pub async fn init(directory: &Path, config: Config) -> Result<()>
{
    use tokio::fs;

    let io_err = |path: &Path| {
        let path = path.to_path_buf();
        move |err| Error::Io { err, path }
    };

    let configuration_file_path = directory.join(Config::DEFAULT_CONFIG_FILE);
    if configuration_file_path.exists() {
        log::info!("\"{}\" already exists", configuration_file_path.display());
        return Ok(());
    }

    fs::create_dir_all(directory).await.map_err(io_err(directory))?;

    // Serialize the defualt values, then write it to the new config file
    let toml = toml::to_string_pretty(&config).map_err(|e| Error::ConfigParse(e.to_string()))?;
    fs::write(&configuration_file_path, toml)
        .await
        .map_err(io_err(&configuration_file_path))?;
    println!("Created: \"{}\"", configuration_file_path.display());

    let pipeline_path = directory.join(&config.pipeline);
    fs::write(&pipeline_path, pipeline::AssetPipeline::default().to_toml()?)
        .await
        .map_err(io_err(&pipeline_path))?;
    println!("Created: \"{}\"", pipeline_path.display());

    let source = directory.join(&config.source);
    fs::create_dir_all(&source).await.map_err(io_err(&source))?;
    println!("Created: \"{}\"", source.display());

    let post_path = source.join(defaults::DEFAULT_POST_FILE);
    fs::write(&post_path, defaults::DEFAULT_POST_SRC)
        .await
        .map_err(io_err(&post_path))?;
    println!("Created: \"{}\"", post_path.display());
    Ok(())
}
