use tracing::debug;

use crate::apps::terminal::join;
use crate::filesystem::{Vfs, VfsError};
use crate::storage::KeyValueStore;

pub const HOME_PAGE: &str = "https://www.google.com";
const SAMPLE_FILE_NAME: &str = "sample.html";
const SAMPLE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head>
    <title>NebulaOS Sample Page</title>
</head>
<body>
    <h1>Welcome to NebulaOS Browser!</h1>
    <h3>Local HTML Support</h3>
    <p>This page is loaded from the virtual file system. You can create and edit HTML files using the Notepad app!</p>
    <h3>Web Browsing</h3>
    <p>Navigate to any website by entering a URL in the address bar above.</p>
    <h3>File System Integration</h3>
    <p>Use paths like /home/user/mypage.html to load local files.</p>
</body>
</html>"#;

/// What the browser shows after navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Page {
    /// Markup read from the filesystem.
    Local { path: String, html: String },
    /// A local path that could not be read.
    Missing { path: String },
    Web { url: String },
}

impl Page {
    /// Markup to render in place, or `None` for pages loaded from the web.
    pub fn html(&self) -> Option<String> {
        match self {
            Page::Local { html, .. } => Some(html.clone()),
            Page::Missing { path } => Some(format!(
                "<html><body><h1>File Not Found</h1><p>Could not load: {path}</p></body></html>"
            )),
            Page::Web { .. } => None,
        }
    }

    pub fn status(&self) -> String {
        match self {
            Page::Local { path, .. } | Page::Missing { path } => format!("Local File: {path}"),
            Page::Web { url } => format!("Web: {url}"),
        }
    }
}

/// Address bar of the browser app. Paths starting with `/`, `./` or `../`
/// are read from the filesystem; anything else is treated as a web address.
#[derive(Debug, Clone)]
pub struct Browser {
    home: String,
}

impl Browser {
    /// `home` is where relative paths and the sample page live.
    pub fn new(home: impl Into<String>) -> Self {
        Self { home: home.into() }
    }

    pub fn navigate<S: KeyValueStore>(&self, vfs: &Vfs<S>, address: &str) -> Page {
        let address = address.trim();
        if !is_local(address) {
            let url = if address.starts_with("http://") || address.starts_with("https://") {
                address.to_string()
            } else {
                format!("https://{address}")
            };
            return Page::Web { url };
        }

        let path = join(&self.home, address);
        match vfs.read_file(&path) {
            Ok(html) => Page::Local { path, html },
            Err(e) => {
                debug!("Browser could not load '{}': {}", address, e);
                Page::Missing { path }
            }
        }
    }

    /// Writes the bundled sample page into the home directory and opens it.
    pub fn open_sample<S: KeyValueStore>(&self, vfs: &mut Vfs<S>) -> Result<Page, VfsError> {
        let path = join(&self.home, SAMPLE_FILE_NAME);
        vfs.write_file(&path, SAMPLE_PAGE)?;
        Ok(self.navigate(vfs, &path))
    }
}

fn is_local(address: &str) -> bool {
    address.starts_with('/') || address.starts_with("./") || address.starts_with("../")
}
