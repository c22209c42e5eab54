use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Quill.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Quill.toml").exists() {
            builder = builder.add_source(File::new("Quill.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
    pub redis: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Hosts {
    pub app: String,
    pub api: String,
    pub events: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Api {
    pub host: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Gateway {
    pub host: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub hosts: Hosts,
    pub api: Api,
    pub gateway: Gateway,
}

pub async fn init() {
    println!(
        ":: Quill Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub use pretty_env_logger;

/// Initialise logging for an application
pub fn setup_logging() {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    pretty_env_logger::init();
}

/// Configure common requirements for an application
#[macro_export]
macro_rules! configure {
    () => {
        $crate::setup_logging();
        $crate::init().await;
    };
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}

#[cfg(feature = "test")]
#[cfg(test)]
mod tests {
    use crate::init;

    #[async_std::test]
    async fn it_works() {
        init().await;
    }
}
