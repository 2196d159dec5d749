use std::sync::Arc;

use async_trait::async_trait;

use super::error::Result;
use super::graph::GraphClient;
use super::types::{Album, ImageType, Photo, Video};

/// Albums, photos and videos. Read access only; uploads are not supported.
#[async_trait]
pub trait MediaOperations: Send + Sync {
    async fn get_albums(&self) -> Result<Vec<Album>>;

    async fn get_albums_for(&self, owner_id: &str) -> Result<Vec<Album>>;

    async fn get_album(&self, album_id: &str) -> Result<Album>;

    /// Cover image of an album.
    async fn get_album_image(&self, album_id: &str, image_type: ImageType) -> Result<Vec<u8>>;

    async fn get_photos(&self, album_id: &str) -> Result<Vec<Photo>>;

    async fn get_photo(&self, photo_id: &str) -> Result<Photo>;

    async fn get_photo_image(&self, photo_id: &str, image_type: ImageType) -> Result<Vec<u8>>;

    /// Videos the current user is tagged in or uploaded.
    async fn get_videos(&self) -> Result<Vec<Video>>;

    async fn get_videos_for(&self, owner_id: &str) -> Result<Vec<Video>>;

    async fn get_video(&self, video_id: &str) -> Result<Video>;

    async fn get_video_image(&self, video_id: &str, image_type: ImageType) -> Result<Vec<u8>>;
}

#[derive(Debug, Clone)]
pub struct MediaTemplate {
    graph: Arc<GraphClient>,
}

impl MediaTemplate {
    pub(crate) fn new(graph: Arc<GraphClient>) -> Self {
        Self { graph }
    }
}

#[async_trait]
impl MediaOperations for MediaTemplate {
    async fn get_albums(&self) -> Result<Vec<Album>> {
        self.get_albums_for("me").await
    }

    async fn get_albums_for(&self, owner_id: &str) -> Result<Vec<Album>> {
        self.graph
            .fetch_connections(owner_id, "albums", Vec::new())
            .await
    }

    async fn get_album(&self, album_id: &str) -> Result<Album> {
        self.graph.fetch_object(album_id, Vec::new()).await
    }

    async fn get_album_image(&self, album_id: &str, image_type: ImageType) -> Result<Vec<u8>> {
        self.graph.fetch_image(album_id, "picture", image_type).await
    }

    async fn get_photos(&self, album_id: &str) -> Result<Vec<Photo>> {
        self.graph
            .fetch_connections(album_id, "photos", Vec::new())
            .await
    }

    async fn get_photo(&self, photo_id: &str) -> Result<Photo> {
        self.graph.fetch_object(photo_id, Vec::new()).await
    }

    async fn get_photo_image(&self, photo_id: &str, image_type: ImageType) -> Result<Vec<u8>> {
        self.graph.fetch_image(photo_id, "picture", image_type).await
    }

    async fn get_videos(&self) -> Result<Vec<Video>> {
        self.get_videos_for("me").await
    }

    async fn get_videos_for(&self, owner_id: &str) -> Result<Vec<Video>> {
        self.graph
            .fetch_connections(owner_id, "videos", Vec::new())
            .await
    }

    async fn get_video(&self, video_id: &str) -> Result<Video> {
        self.graph.fetch_object(video_id, Vec::new()).await
    }

    async fn get_video_image(&self, video_id: &str, image_type: ImageType) -> Result<Vec<u8>> {
        self.graph.fetch_image(video_id, "picture", image_type).await
    }
}
