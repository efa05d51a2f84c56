use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A stored file as listed by `/api/images/get-files/:directory`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ImageFile {
    pub directory: String,
    pub filename: String,
}

impl ImageFile {
    pub fn path(&self) -> String {
        format!("{}/{}", self.directory, self.filename)
    }

    pub fn extension(&self) -> Option<FileExtension> {
        self.filename
            .rsplit_once('.')
            .and_then(|(_, ext)| ext.parse().ok())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileExtension {
    Jpg,
    Png,
    Webp,
}

impl FromStr for FileExtension {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(FileExtension::Jpg),
            "png" => Ok(FileExtension::Png),
            "webp" => Ok(FileExtension::Webp),
            _ => Err(()),
        }
    }
}

impl fmt::Display for FileExtension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ext = match self {
            FileExtension::Jpg => "jpg",
            FileExtension::Png => "png",
            FileExtension::Webp => "webp",
        };
        f.write_str(ext)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_filename() {
        let file = ImageFile {
            directory: "brands".into(),
            filename: "logo.JPEG".into(),
        };
        assert_eq!(file.extension(), Some(FileExtension::Jpg));
        assert_eq!(file.path(), "brands/logo.JPEG");
        assert_eq!(FileExtension::Png.to_string(), "png");
        assert!("gif".parse::<FileExtension>().is_err());
    }
}
