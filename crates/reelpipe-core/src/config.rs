//! Configuration module
//!
//! Server, storage and ingestion pipeline settings, read from the process
//! environment (after loading an optional `.env` file).

use std::env;
use std::path::PathBuf;

use crate::models::{AspectBands, RatioBand};
use crate::storage_types::StorageBackend;

// Common constants
const SERVER_PORT: u16 = 8091;
const MAX_VIDEO_SIZE_MB: usize = 1024;
const MAX_THUMBNAIL_SIZE_MB: usize = 10;
const VIDEO_CONTENT_TYPE: &str = "video/mp4";
const MAX_CONCURRENT_INGESTS: usize = 4;

/// Base configuration for the HTTP process
#[derive(Clone, Debug)]
pub struct BaseConfig {
    pub server_port: u16,
    pub environment: String,
    pub jwt_secret: String,
    /// Origin used when building URLs served by this process (thumbnails).
    pub public_base_url: String,
}

/// Media ingestion configuration
#[derive(Clone, Debug)]
pub struct MediaConfig {
    pub base: BaseConfig,
    /// Metadata store; `None` keeps records in memory.
    pub database_url: Option<String>,
    // Storage configuration
    pub storage_backend: StorageBackend,
    pub s3_bucket: Option<String>,
    pub s3_region: Option<String>,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO etc.)
    pub local_storage_path: Option<String>,
    pub local_storage_base_url: Option<String>,
    // Upload limits
    pub max_video_size_bytes: usize,
    pub video_content_type: String,
    pub max_thumbnail_size_bytes: usize,
    // External tools and staging
    pub ffmpeg_path: String,
    pub ffprobe_path: String,
    pub staging_dir: PathBuf,
    pub max_concurrent_ingests: usize,
    pub aspect_bands: AspectBands,
}

/// Application configuration.
#[derive(Clone, Debug)]
pub struct Config(pub Box<MediaConfig>);

impl Config {
    fn as_media(&self) -> &MediaConfig {
        &self.0
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        let environment = self.as_media().base.environment.to_lowercase();
        environment == "production" || environment == "prod"
    }

    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();
        let config = MediaConfig::from_lookup(|key| env::var(key).ok())?;
        Ok(Config(Box::new(config)))
    }

    /// Build from an arbitrary key lookup instead of the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Config(Box::new(MediaConfig::from_lookup(lookup)?)))
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        self.as_media().validate()
    }

    pub fn server_port(&self) -> u16 {
        self.as_media().base.server_port
    }

    pub fn environment(&self) -> &str {
        &self.as_media().base.environment
    }

    pub fn jwt_secret(&self) -> &str {
        &self.as_media().base.jwt_secret
    }

    pub fn public_base_url(&self) -> &str {
        &self.as_media().base.public_base_url
    }

    pub fn database_url(&self) -> Option<&str> {
        self.as_media().database_url.as_deref()
    }

    pub fn storage_backend(&self) -> StorageBackend {
        self.as_media().storage_backend
    }

    pub fn s3_bucket(&self) -> Option<&str> {
        self.as_media().s3_bucket.as_deref()
    }

    pub fn s3_region(&self) -> Option<&str> {
        self.as_media().s3_region.as_deref()
    }

    pub fn s3_endpoint(&self) -> Option<&str> {
        self.as_media().s3_endpoint.as_deref()
    }

    pub fn local_storage_path(&self) -> Option<&str> {
        self.as_media().local_storage_path.as_deref()
    }

    pub fn local_storage_base_url(&self) -> Option<&str> {
        self.as_media().local_storage_base_url.as_deref()
    }

    pub fn max_video_size_bytes(&self) -> usize {
        self.as_media().max_video_size_bytes
    }

    pub fn video_content_type(&self) -> &str {
        &self.as_media().video_content_type
    }

    pub fn max_thumbnail_size_bytes(&self) -> usize {
        self.as_media().max_thumbnail_size_bytes
    }

    pub fn ffmpeg_path(&self) -> &str {
        &self.as_media().ffmpeg_path
    }

    pub fn ffprobe_path(&self) -> &str {
        &self.as_media().ffprobe_path
    }

    pub fn staging_dir(&self) -> &PathBuf {
        &self.as_media().staging_dir
    }

    pub fn max_concurrent_ingests(&self) -> usize {
        self.as_media().max_concurrent_ingests
    }

    pub fn aspect_bands(&self) -> AspectBands {
        self.as_media().aspect_bands
    }
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, default: T) -> T {
    value.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Megabytes to bytes, rejecting values that do not fit in `usize`.
fn megabytes(key: &str, value: usize) -> Result<usize, anyhow::Error> {
    value
        .checked_mul(1024 * 1024)
        .ok_or_else(|| anyhow::anyhow!("{} is too large", key))
}

impl MediaConfig {
    /// Build the configuration from a key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, anyhow::Error>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = lookup("ENVIRONMENT")
            .or_else(|| lookup("APP_ENV"))
            .unwrap_or_else(|| "development".to_string());

        let server_port = match lookup("PORT") {
            Some(port) => port
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            None => SERVER_PORT,
        };

        let base = BaseConfig {
            server_port,
            environment,
            jwt_secret: lookup("JWT_SECRET")
                .ok_or_else(|| anyhow::anyhow!("JWT_SECRET must be set for authentication"))?,
            public_base_url: lookup("PUBLIC_BASE_URL")
                .unwrap_or_else(|| format!("http://localhost:{}", server_port)),
        };

        let storage_backend = match lookup("STORAGE_BACKEND") {
            Some(value) => value.parse()?,
            None => StorageBackend::S3,
        };

        let defaults = AspectBands::default();
        let aspect_bands = AspectBands {
            landscape: RatioBand::new(
                parse_or(lookup("LANDSCAPE_RATIO_MIN"), defaults.landscape.min),
                parse_or(lookup("LANDSCAPE_RATIO_MAX"), defaults.landscape.max),
            ),
            portrait: RatioBand::new(
                parse_or(lookup("PORTRAIT_RATIO_MIN"), defaults.portrait.min),
                parse_or(lookup("PORTRAIT_RATIO_MAX"), defaults.portrait.max),
            ),
        };

        Ok(MediaConfig {
            base,
            database_url: lookup("DATABASE_URL").filter(|s| !s.trim().is_empty()),
            storage_backend,
            s3_bucket: lookup("S3_BUCKET"),
            s3_region: lookup("S3_REGION").or_else(|| lookup("AWS_REGION")),
            s3_endpoint: lookup("S3_ENDPOINT"),
            local_storage_path: lookup("LOCAL_STORAGE_PATH"),
            local_storage_base_url: lookup("LOCAL_STORAGE_BASE_URL"),
            max_video_size_bytes: megabytes(
                "MAX_VIDEO_SIZE_MB",
                parse_or(lookup("MAX_VIDEO_SIZE_MB"), MAX_VIDEO_SIZE_MB),
            )?,
            video_content_type: lookup("VIDEO_CONTENT_TYPE")
                .map(|s| s.trim().to_lowercase())
                .unwrap_or_else(|| VIDEO_CONTENT_TYPE.to_string()),
            max_thumbnail_size_bytes: megabytes(
                "MAX_THUMBNAIL_SIZE_MB",
                parse_or(lookup("MAX_THUMBNAIL_SIZE_MB"), MAX_THUMBNAIL_SIZE_MB),
            )?,
            ffmpeg_path: lookup("FFMPEG_PATH").unwrap_or_else(|| "ffmpeg".to_string()),
            ffprobe_path: lookup("FFPROBE_PATH").unwrap_or_else(|| "ffprobe".to_string()),
            staging_dir: lookup("STAGING_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(env::temp_dir),
            max_concurrent_ingests: parse_or(
                lookup("MAX_CONCURRENT_INGESTS"),
                MAX_CONCURRENT_INGESTS,
            ),
            aspect_bands,
        })
    }

    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.base.jwt_secret.trim().is_empty() {
            return Err(anyhow::anyhow!("JWT_SECRET must not be empty"));
        }
        if self.max_video_size_bytes == 0 {
            return Err(anyhow::anyhow!("MAX_VIDEO_SIZE_MB must be greater than 0"));
        }
        if self.max_thumbnail_size_bytes == 0 {
            return Err(anyhow::anyhow!(
                "MAX_THUMBNAIL_SIZE_MB must be greater than 0"
            ));
        }
        if self.video_content_type.is_empty() {
            return Err(anyhow::anyhow!("VIDEO_CONTENT_TYPE must not be empty"));
        }
        if self.max_concurrent_ingests == 0 {
            return Err(anyhow::anyhow!(
                "MAX_CONCURRENT_INGESTS must be greater than 0"
            ));
        }
        if !self.aspect_bands.landscape.is_valid() {
            return Err(anyhow::anyhow!(
                "LANDSCAPE_RATIO_MIN must be lower than LANDSCAPE_RATIO_MAX"
            ));
        }
        if !self.aspect_bands.portrait.is_valid() {
            return Err(anyhow::anyhow!(
                "PORTRAIT_RATIO_MIN must be lower than PORTRAIT_RATIO_MAX"
            ));
        }

        match self.storage_backend {
            StorageBackend::S3 => {
                if self.s3_bucket.is_none() {
                    return Err(anyhow::anyhow!("S3_BUCKET must be set for the s3 backend"));
                }
                if self.s3_region.is_none() {
                    return Err(anyhow::anyhow!(
                        "S3_REGION or AWS_REGION must be set for the s3 backend"
                    ));
                }
            }
            StorageBackend::Local => {
                if self.local_storage_path.is_none() || self.local_storage_base_url.is_none() {
                    return Err(anyhow::anyhow!(
                        "LOCAL_STORAGE_PATH and LOCAL_STORAGE_BASE_URL must be set for the local backend"
                    ));
                }
            }
        }

        Ok(())
    }
}
