use std::{fs, path::Path};

use crate::LoadError;

#[derive(Debug, Clone, PartialEq, Eq)]
/// Represents a single rom with it's information
pub struct Rom {
    /// The rom name
    name: String,
    /// The raw program, placed into memory verbatim
    data: Box<[u8]>,
}

impl Rom {
    /// Will generate a new rom based of the given data
    pub fn new(name: &str, data: impl Into<Box<[u8]>>) -> Self {
        Rom {
            name: name.to_string(),
            data: data.into(),
        }
    }

    /// Will read the rom from the given file, the file name is used as the rom name.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let data = fs::read(path)?;
        let name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        log::info!("read rom {} ({} bytes)", name, data.len());
        Ok(Rom::new(&name, data))
    }

    /// Will return a slice internal values of the given data
    pub fn get_data(&self) -> &[u8] {
        &self.data
    }

    /// Will return the name of the rom.
    pub fn get_name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
