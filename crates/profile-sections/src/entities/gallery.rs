//! Gallery images. The only kind with a file payload: create and update go
//! out as `multipart/form-data`.

use crate::adapter::{EntityAdapter, EntityKind, InsertPosition, Mutation};
use bytes::Bytes;
use profile_http::{FilePart, MultipartForm, RequestBody, Result as ApiResult};
use serde::{Deserialize, Serialize};

/// Multipart field name of the image file.
pub const IMAGE_FIELD: &str = "image";

/// A file selected for upload but not yet sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ImageUpload {
    pub file_name: String,
    pub mime: Option<String>,
    pub bytes: Bytes,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GalleryImage {
    pub id: Option<i64>,
    pub caption: String,
    /// The server keeps at most one image per performer flagged.
    pub is_profile_picture: bool,
    pub image_url: Option<String>,
    pub upload: Option<ImageUpload>,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GalleryRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(default)]
    pub caption: String,
    #[serde(default)]
    pub is_profile_picture: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    /// Never part of the JSON shape; sent as the `image` file part.
    #[serde(skip)]
    pub upload: Option<ImageUpload>,
}

pub struct GalleryAdapter;

impl EntityAdapter for GalleryAdapter {
    type Item = GalleryImage;
    type Wire = GalleryRecord;

    const KIND: EntityKind = EntityKind::GalleryImage;
    const INSERT_AT: InsertPosition = InsertPosition::Back;

    fn raw_identity(item: &GalleryImage) -> Option<i64> {
        item.id
    }

    fn placeholder() -> GalleryImage {
        GalleryImage::default()
    }

    fn to_wire(item: &GalleryImage) -> GalleryRecord {
        GalleryRecord {
            id: Self::identity(item),
            caption: item.caption.clone(),
            is_profile_picture: item.is_profile_picture,
            image_url: item.image_url.clone(),
            upload: item.upload.clone(),
        }
    }

    fn from_wire(record: GalleryRecord) -> GalleryImage {
        GalleryImage {
            id: record.id,
            caption: record.caption,
            is_profile_picture: record.is_profile_picture,
            image_url: record.image_url,
            upload: record.upload,
        }
    }

    fn request_body(record: &GalleryRecord) -> ApiResult<RequestBody> {
        let mut form = MultipartForm::new()
            .text("caption", record.caption.clone())
            .text("isProfilePicture", record.is_profile_picture.to_string());

        if let Some(id) = record.id {
            form = form.text("id", id.to_string());
        }
        if let Some(upload) = &record.upload {
            form = form.file(FilePart {
                name: IMAGE_FIELD.to_string(),
                file_name: upload.file_name.clone(),
                mime: upload.mime.clone(),
                bytes: upload.bytes.clone(),
            });
        }

        Ok(RequestBody::Multipart(form))
    }

    /// A saved image may have changed the profile picture; an emptied
    /// gallery leaves the header without one.
    fn refreshes_host(mutation: Mutation, remaining: usize) -> bool {
        match mutation {
            Mutation::Created | Mutation::Updated => true,
            Mutation::Deleted => remaining == 0,
        }
    }
}
