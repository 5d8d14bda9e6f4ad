//! Mounts one section against the live API and drives it from a CLI action.

use crate::Action;
use anyhow::{bail, Context};
use bytes::Bytes;
use profile_http::ProfileClient;
use profile_sections::entities::{GalleryImage, ImageUpload};
use profile_sections::{EntityAdapter, RestCollection, SectionContext, SectionController};
use std::io::{self, BufRead, Write};
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Attaches a local file to an item before it is saved.
pub type Attach<T> = fn(&mut T, &Path) -> anyhow::Result<()>;

pub fn no_attachment<T>(_item: &mut T, path: &Path) -> anyhow::Result<()> {
    bail!("--file is only supported for the gallery (got {})", path.display())
}

pub fn attach_image(image: &mut GalleryImage, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload".to_string());
    image.upload = Some(ImageUpload {
        mime: image_mime(path).map(str::to_string),
        file_name,
        bytes: Bytes::from(bytes),
    });
    Ok(())
}

fn image_mime(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

fn parse_item<A: EntityAdapter>(
    json: &str,
    file: Option<&Path>,
    attach: Attach<A::Item>,
) -> anyhow::Result<A::Item> {
    let record: A::Wire = serde_json::from_str(json)
        .with_context(|| format!("invalid {} record", A::KIND))?;
    let mut item = A::from_wire(record);
    if let Some(path) = file {
        attach(&mut item, path)?;
    }
    Ok(item)
}

fn print_items<A: EntityAdapter>(items: &[A::Item]) -> anyhow::Result<()> {
    if items.is_empty() {
        println!("({} is empty)", A::KIND);
        return Ok(());
    }
    for (index, item) in items.iter().enumerate() {
        println!("[{}] {}", index, serde_json::to_string(&A::to_wire(item))?);
    }
    Ok(())
}

fn confirm_prompt(question: &str) -> anyhow::Result<bool> {
    print!("{} [y/N] ", question);
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

pub(crate) async fn run_section<A: EntityAdapter>(
    client: ProfileClient,
    action: Action,
    attach: Attach<A::Item>,
) -> anyhow::Result<()> {
    let remote = Arc::new(RestCollection::<A>::new(client));
    let controller = SectionController::new(remote, SectionContext::owner())
        .with_host_refresh(|| info!("[CLI] profile header changed; reload the profile page"));

    controller.load().await?;

    match action {
        Action::List => {}
        Action::Add { json, file } => {
            let item = parse_item::<A>(&json, file.as_deref(), attach)?;
            controller.add()?;
            controller.save(item).await?;
            println!("Added to {}", A::KIND);
        }
        Action::Edit { index, json, file } => {
            let item = parse_item::<A>(&json, file.as_deref(), attach)?;
            controller.edit(index)?;
            controller.save(item).await?;
            println!("Updated {} [{}]", A::KIND, index);
        }
        Action::Delete { index, yes } => {
            controller.request_delete(index)?;
            let target = controller
                .cursor()
                .pending_delete_target
                .map(|item| serde_json::to_string(&A::to_wire(&item)))
                .transpose()?
                .unwrap_or_default();
            if !yes && !confirm_prompt(&format!("Delete {} [{}] {}?", A::KIND, index, target))? {
                controller.cancel_delete()?;
                println!("Cancelled");
                return Ok(());
            }
            controller.confirm_delete().await?;
            println!("Deleted {} [{}]", A::KIND, index);
        }
    }

    print_items::<A>(&controller.items())
}

#[cfg(test)]
mod tests {
    use super::*;
    use profile_sections::entities::{AchievementAdapter, GalleryAdapter};
    use std::path::PathBuf;

    #[test]
    fn test_image_mime_by_extension() {
        assert_eq!(image_mime(Path::new("a/b/head.JPG")), Some("image/jpeg"));
        assert_eq!(image_mime(Path::new("still.png")), Some("image/png"));
        assert_eq!(image_mime(Path::new("notes.txt")), None);
        assert_eq!(image_mime(Path::new("noext")), None);
    }

    #[test]
    fn test_parse_item_from_wire_json() {
        let item = parse_item::<AchievementAdapter>(
            r#"{"rank":"1st","field":"Dance","showName":"Spring","year":2023}"#,
            None,
            no_attachment,
        )
        .unwrap();
        assert_eq!(item.id, None);
        assert_eq!(item.show_name, "Spring");
        assert_eq!(item.year, Some(2023));

        assert!(parse_item::<AchievementAdapter>("not json", None, no_attachment).is_err());
    }

    #[test]
    fn test_file_rejected_outside_gallery() {
        let path = PathBuf::from("x.jpg");
        assert!(parse_item::<AchievementAdapter>("{}", Some(path.as_path()), no_attachment).is_err());
    }

    #[test]
    fn test_gallery_attaches_missing_file_errors() {
        let path = PathBuf::from("/definitely/not/here.jpg");
        let err = parse_item::<GalleryAdapter>(r#"{"caption":"x"}"#, Some(path.as_path()), attach_image)
            .unwrap_err();
        assert!(err.to_string().contains("reading"));
    }
}
