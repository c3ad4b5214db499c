use crate::error::{self, Result};
use chronobox_datatypes::codec::IsoTimestampFormat;
use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;
use snafu::ResultExt;
use std::sync::{LazyLock, RwLock};

const DEFAULT_SETTINGS: &str = include_str!("../Settings-default.toml");

static SETTINGS: LazyLock<RwLock<Config>> = LazyLock::new(init_settings);

fn init_settings() -> RwLock<Config> {
    let mut settings = Config::builder()
        .add_source(File::from_str(DEFAULT_SETTINGS, FileFormat::Toml))
        .add_source(File::new("Settings.toml", FileFormat::Toml).required(false));

    // Override config with environment variables that start with `CHRONOBOX__`,
    // e.g. `CHRONOBOX__LOGGING__LOG_SPEC=debug`
    // Note: Since variables contain underscores, we need to use something different
    // for separating groups, for instance double underscores `__`
    settings = settings.add_source(Environment::with_prefix("chronobox").separator("__"));

    RwLock::new(
        settings
            .build()
            .expect("it should crash the program if this fails"),
    )
}

#[cfg(test)]
pub fn set_config<T>(key: &str, value: T) -> Result<()>
where
    T: Into<config::Value>,
{
    let mut settings = SETTINGS
        .write()
        .map_err(|_error| error::Error::ConfigLockFailed)?;

    let builder = Config::builder()
        .add_source(settings.clone())
        .set_override(key, value)
        .context(error::Config)?;

    *settings = builder.build().context(error::Config)?;
    Ok(())
}

pub fn get_config<'a, T>(key: &str) -> Result<T>
where
    T: Deserialize<'a>,
{
    SETTINGS
        .read()
        .map_err(|_error| error::Error::ConfigLockFailed)?
        .get::<T>(key)
        .context(error::Config)
}

pub fn get_config_element<'a, T>() -> Result<T>
where
    T: ConfigElement + Deserialize<'a>,
{
    get_config(T::KEY)
}

pub trait ConfigElement {
    const KEY: &'static str;
}

#[derive(Debug, Deserialize)]
pub struct Logging {
    pub log_spec: String,
}

impl ConfigElement for Logging {
    const KEY: &'static str = "logging";
}

#[derive(Debug, Deserialize)]
pub struct TextCodec {
    #[serde(rename = "timestamp_offset_minutes")]
    pub timestamp_format: IsoTimestampFormat,
}

impl ConfigElement for TextCodec {
    const KEY: &'static str = "text_codec";
}
