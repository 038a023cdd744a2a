//! Catbox Client
//!
//! Async HTTP client for the Catbox file hosting API and its Litterbox
//! temporary tier.
//!
//! # Features
//!
//! - **Upload**: Permanent uploads from a path or a byte buffer
//! - **Litterbox**: Temporary uploads that expire after 1h to 1w
//! - **Albums**: Chunked batch uploads, create/edit/delete albums
//! - **Deletion**: Remove uploaded files in one request
//!
//! # Example
//!
//! ```ignore
//! use catbox_client::{CatboxClient, CatboxConfig, LitterboxDuration, UploadInput};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CatboxClient::new(CatboxConfig::with_userhash("my-userhash"))?;
//!
//!     // Permanent upload
//!     let url = client.upload_file(UploadInput::from("cat.png"), None, None).await?;
//!     println!("Uploaded to {}", url);
//!
//!     // Temporary upload, no userhash needed
//!     let temp = client
//!         .upload_to_litterbox(b"hello".to_vec(), Some("hello.txt"), LitterboxDuration::OneDay, None)
//!         .await?;
//!     println!("Expires tomorrow: {}", temp);
//!
//!     // Group uploads into an album
//!     let album = client.create_album(&[url], "Cats", None).await?;
//!     println!("Album: https://catbox.moe/c/{}", album);
//!
//!     Ok(())
//! }
//! ```

mod album;
mod client;
mod error;
mod types;
mod upload;

// Re-export main types
pub use client::{extract_shortcode, CatboxClient};
pub use error::{CatboxError, Result};
pub use types::{
    BatchOptions, CatboxConfig, LitterboxDuration, UploadInput, DEFAULT_ALBUM_CHUNK_SIZE,
    DEFAULT_ALBUM_DELAY, DEFAULT_ALBUM_URL, DEFAULT_API_URL, DEFAULT_FILE_URL, DEFAULT_TIMEOUT,
};
