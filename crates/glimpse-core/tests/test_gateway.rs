use std::path::{Path, PathBuf};

use glimpse_core::config::ViewerConfig;
use glimpse_core::error::GlimpseError;
use glimpse_core::gateway::{DropGateway, ExternalEventSource, FileDropEvent, LoadRequest};

fn gateway() -> DropGateway {
    DropGateway::new(&ViewerConfig::default().extensions)
}

fn dropped(paths: &[&str]) -> FileDropEvent {
    FileDropEvent::Dropped(paths.iter().map(PathBuf::from).collect())
}

#[test]
fn test_extension_allow_list_is_case_insensitive() {
    let gw = gateway();
    assert!(gw.is_supported(Path::new("photo.PNG")));
    assert!(gw.is_supported(Path::new("/home/u/a.JpEg")));
    assert!(gw.is_supported(Path::new("x.webp")));
    assert!(gw.is_supported(Path::new("x.gif")));
    assert!(gw.is_supported(Path::new("x.bmp")));
    assert!(!gw.is_supported(Path::new("photo.TIFF")));
    assert!(!gw.is_supported(Path::new("README")));
    assert!(!gw.is_supported(Path::new(".png")));
}

#[test]
fn test_only_first_valid_path_is_requested() {
    let mut gw = gateway();
    let request = gw.handle(dropped(&["a.png", "b.png"]));
    assert_eq!(
        request,
        Some(LoadRequest {
            path: PathBuf::from("a.png")
        })
    );
}

#[test]
fn test_invalid_entries_are_skipped() {
    let mut gw = gateway();
    let request = gw.handle(dropped(&["notes.txt", "scan.tiff", "c.JPG", "d.png"]));
    assert_eq!(request.map(|r| r.path), Some(PathBuf::from("c.JPG")));
}

#[test]
fn test_all_invalid_is_silent() {
    let mut gw = gateway();
    assert_eq!(gw.handle(dropped(&["photo.TIFF", "doc.pdf"])), None);
    assert_eq!(gw.handle(dropped(&[])), None);
}

#[test]
fn test_hover_highlight() {
    let mut gw = gateway();
    assert!(!gw.is_highlighted());
    gw.handle(FileDropEvent::Hovered);
    assert!(gw.is_highlighted());
    gw.handle(FileDropEvent::Left);
    assert!(!gw.is_highlighted());

    gw.handle(FileDropEvent::Hovered);
    gw.handle(dropped(&["a.png"]));
    assert!(!gw.is_highlighted(), "a drop ends the hover");
}

#[test]
fn test_open_dialog_result() {
    let gw = gateway();
    assert_eq!(gw.open_path(None), None);
    assert_eq!(gw.open_path(Some(PathBuf::from("x.tiff"))), None);
    assert!(gw.open_path(Some(PathBuf::from("x.Bmp"))).is_some());
}

#[test]
fn test_request_for_names_rejected_file() {
    let gw = gateway();
    let err = gw.request_for(PathBuf::from("notes.txt")).unwrap_err();
    assert!(matches!(err, GlimpseError::UnsupportedFile(_)));
    assert!(err.to_string().contains("notes.txt"));
    assert_eq!(
        gw.request_for(PathBuf::from("shot.webp")).unwrap(),
        LoadRequest {
            path: PathBuf::from("shot.webp")
        }
    );
}

struct ScriptedSource(Vec<FileDropEvent>);

impl ExternalEventSource for ScriptedSource {
    fn poll_drop_events(&mut self) -> Vec<FileDropEvent> {
        std::mem::take(&mut self.0)
    }
}

#[test]
fn test_drain_external_source() {
    let mut gw = gateway();
    let mut source = ScriptedSource(vec![
        FileDropEvent::Hovered,
        dropped(&["skip.txt", "first.webp", "second.png"]),
    ]);
    let request = gw.drain(&mut source);
    assert_eq!(request.map(|r| r.path), Some(PathBuf::from("first.webp")));
    assert!(!gw.is_highlighted());
    assert_eq!(gw.drain(&mut source), None);
}

#[test]
fn test_custom_allow_list() {
    let gw = DropGateway::new(&["PNG".to_string()]);
    assert!(gw.is_supported(Path::new("a.png")));
    assert!(!gw.is_supported(Path::new("a.jpg")));
}
