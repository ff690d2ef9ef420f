use std::{env, fs, ops::Deref, path::PathBuf, sync::Arc};

use url::Url;

use crate::{
    error::Error,
    provider::{ObjectStorage, S3Storage, HTTP},
};

pub const DEFAULT_POOL_ADDRESS: &str =
    "0x88e6a0c2ddd26feeb64f039a2c41296fcb3f5640";

pub const POOL_DAY_COUNT: u8 = 14;

#[derive(Debug)]
pub struct AppState<T>(Arc<T>);

impl<T> AppState<T> {
    pub fn new(state: T) -> AppState<T> {
        AppState(Arc::new(state))
    }
}

impl<T> Clone for AppState<T> {
    fn clone(&self) -> AppState<T> {
        AppState(Arc::clone(&self.0))
    }
}

impl<T> Deref for AppState<T> {
    type Target = Arc<T>;

    fn deref(&self) -> &Arc<T> {
        &self.0
    }
}

pub struct State {
    pub config: Config,
    pub http: HTTP,
    pub storage: Box<dyn ObjectStorage>,
}

impl State {
    pub async fn new(config: Config) -> Result<State, Error> {
        let http = HTTP::new(config.clone())?;
        let storage = S3Storage::new(&config).await;

        Ok(Self::with_storage(config, http, Box::new(storage)))
    }

    pub fn with_storage(
        config: Config,
        http: HTTP,
        storage: Box<dyn ObjectStorage>,
    ) -> State {
        State {
            config,
            http,
            storage,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub access_key: String,
    pub secret_key: String,
    pub region: String,
    pub bucket: String,
    pub api_url: String,
    pub pool_address: String,
    pub scratch_dir: PathBuf,
    pub timeout: u64,
    pub server_host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
}

pub fn get_configuration() -> Result<Config, Error> {
    let access_key = required("AWS_IAM_ACCESS_KEY")?;
    let secret_key = required("AWS_IAM_SECRET_KEY")?;
    let region = required("AWS_BUCKET_REGION")?;
    let bucket = required("AWS_BUCKET_NAME")?;
    let api_url = required("UNISWAP_API_BASE_URL")?;
    Url::parse(&api_url)?;

    let pool_address = optional("POOL_ADDRESS")
        .unwrap_or_else(|| DEFAULT_POOL_ADDRESS.to_owned());
    let scratch_dir = match optional("SCRATCH_DIR") {
        Some(dir) => PathBuf::from(dir),
        None => env::temp_dir().join("datasets"),
    };
    let timeout = match optional("TIMEOUT") {
        Some(value) => value.parse()?,
        None => 30,
    };
    let server_host =
        optional("SERVER_HOST").unwrap_or_else(|| String::from("0.0.0.0"));
    let port: u16 = match optional("PORT") {
        Some(value) => value.parse()?,
        None => 8080,
    };
    let allowed_origins = optional("ALLOWED_ORIGINS")
        .unwrap_or_else(|| String::from("*"))
        .split(',')
        .map(|item| item.trim().to_owned())
        .collect::<Vec<String>>();

    let config = Config {
        access_key,
        secret_key,
        region,
        bucket,
        api_url,
        pool_address,
        scratch_dir,
        timeout,
        server_host,
        port,
        allowed_origins,
    };

    Ok(config)
}

/// Loads `.env` from the working directory into the process environment.
/// Variables already present in the environment win over the file.
pub fn set_configuration() -> Result<(), Error> {
    let config_file: &str = ".env";
    let path = env::current_dir()?.join(config_file);

    if !path.exists() {
        return Ok(());
    }

    let config_string = fs::read_to_string(path)?;

    for (key, value) in parse_config_string(&config_string) {
        if env::var_os(&key).is_none() {
            env::set_var(key, value);
        }
    }

    Ok(())
}

fn parse_config_string(config: &str) -> Vec<(String, String)> {
    config
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let (key, value) = line.split_at(line.find('=')?);
            let value = value[1..].trim().trim_matches('"');
            Some((key.trim().to_owned(), value.to_owned()))
        })
        .collect()
}

fn required(key: &str) -> Result<String, Error> {
    match env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::ConfigurationError(format!("{} is not set", key))),
    }
}

fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}
