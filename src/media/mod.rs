pub mod crop;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Body;
use serde_json::Value;
use std::path::Path;
use tokio_util::io::ReaderStream;
use tracing::{error, info};
use uuid::Uuid;

use crate::api::admin::image as image_api;
use crate::api::{ApiClient, ApiResponse};
use crate::config::{Config, DEFAULT_FILE_SIZE_LIMIT};
use crate::entities::{FileExtension, ImageFile};
use crate::error::MediaError;

pub use crop::{centered_aspect_crop, crop_image, CropRegion, OutputFormat, PercentCrop};

static DIRECTORY_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,40}$").unwrap());

/// Upload directory browser used by the crop widget and the image pickers.
#[derive(Clone, Debug)]
pub struct ImageManager {
    client: ApiClient,
    size_limit: usize,
}

impl ImageManager {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            size_limit: DEFAULT_FILE_SIZE_LIMIT,
        }
    }

    /// Uses the configured `FILE_SIZE_LIMIT`.
    pub fn from_config(client: ApiClient, config: &Config) -> Self {
        Self::new(client).with_size_limit(config.file_size_limit)
    }

    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }

    pub fn public_url(&self, path: &str) -> String {
        self.client.public_url(path)
    }

    pub async fn list(&self, directory: &str) -> Result<Vec<ImageFile>, MediaError> {
        check_directory(directory)?;
        let files = image_api::list_files(&self.client, directory).await?;
        Ok(files
            .into_iter()
            .map(|filename| ImageFile {
                directory: directory.to_string(),
                filename,
            })
            .collect())
    }

    /// Stores `bytes` under a fresh name that keeps the original extension.
    pub async fn upload_bytes(
        &self,
        directory: &str,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, MediaError> {
        check_directory(directory)?;
        self.check_size(bytes.len())?;
        let file_name = unique_name(original_name);
        let content_type = content_type(&file_name);
        let length = bytes.len() as u64;

        let stored = image_api::upload(
            &self.client,
            directory,
            &file_name,
            &content_type,
            Body::from(bytes),
            Some(length),
        )
        .await
        .map_err(|err| {
            error!(directory, file_name = %file_name, error = %err, "Image upload failed");
            err
        })?;
        info!(directory, path = %stored, "Image uploaded");
        Ok(stored)
    }

    /// Streams a file from disk instead of reading it into memory.
    pub async fn upload_file(&self, directory: &str, path: &Path) -> Result<String, MediaError> {
        check_directory(directory)?;
        let file = tokio::fs::File::open(path)
            .await
            .map_err(|err| MediaError::Client(err.into()))?;
        let length = file
            .metadata()
            .await
            .map_err(|err| MediaError::Client(err.into()))?
            .len();
        self.check_size(length as usize)?;

        let original_name = path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("upload");
        let file_name = unique_name(original_name);
        let content_type = content_type(&file_name);
        let body = Body::wrap_stream(ReaderStream::new(file));

        let stored = image_api::upload(
            &self.client,
            directory,
            &file_name,
            &content_type,
            body,
            Some(length),
        )
        .await?;
        info!(directory, path = %stored, "Image uploaded");
        Ok(stored)
    }

    /// Crops the picked image and uploads the result.
    pub async fn upload_cropped(
        &self,
        directory: &str,
        source: &[u8],
        region: CropRegion,
        format: OutputFormat,
    ) -> Result<String, MediaError> {
        let cropped = crop_image(source, region, format)?;
        let name = format!("crop.{}", format.extension());
        self.upload_bytes(directory, &name, cropped).await
    }

    pub async fn delete(
        &self,
        directory: &str,
        filename: &str,
    ) -> Result<ApiResponse<Value>, MediaError> {
        check_directory(directory)?;
        if filename.contains('/') || filename.contains("..") || filename.is_empty() {
            return Err(MediaError::InvalidFileName(filename.to_string()));
        }
        Ok(image_api::delete_file(&self.client, directory, filename).await?)
    }

    fn check_size(&self, size: usize) -> Result<(), MediaError> {
        if size > self.size_limit {
            return Err(MediaError::TooLarge {
                size,
                limit: self.size_limit,
            });
        }
        Ok(())
    }
}

fn check_directory(directory: &str) -> Result<(), MediaError> {
    if DIRECTORY_REGEX.is_match(directory) {
        Ok(())
    } else {
        Err(MediaError::InvalidDirectory(directory.to_string()))
    }
}

fn unique_name(original_name: &str) -> String {
    let extension = Path::new(original_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(|ext| ext.parse::<FileExtension>().ok())
        .map(|ext| ext.to_string());
    match extension {
        Some(extension) => format!("{}.{extension}", Uuid::new_v4()),
        None => Uuid::new_v4().to_string(),
    }
}

fn content_type(file_name: &str) -> String {
    mime_guess::from_path(file_name)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}
