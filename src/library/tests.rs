use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::display::DisplayParts;
use super::*;
use crate::audio::PlaybackController;
use crate::audio::fake::FakeOutput;
use crate::config::{LibrarySettings, TrackDisplayField};

fn t(name: &str) -> Track {
    Track {
        path: PathBuf::from(format!("/music/{name}.mp3")),
        title: name.into(),
        artist: None,
        album: None,
        duration: None,
        display: name.into(),
    }
}

fn opened(fake: &FakeOutput) -> Vec<PathBuf> {
    fake.state.borrow().opened()
}

#[test]
fn display_can_format_artist_title() {
    let fields = [TrackDisplayField::Artist, TrackDisplayField::Title];
    let parts = |artist| DisplayParts {
        path: Path::new("/tmp/Song.mp3"),
        title: "Song",
        artist,
        album: None,
    };

    assert_eq!(parts(Some("Artist")).compose(&fields, " - "), "Artist - Song");
    assert_eq!(parts(Some("  Artist  ")).compose(&fields, " - "), "Artist - Song");
    assert_eq!(parts(None).compose(&fields, " - "), "Song");
    assert_eq!(
        parts(Some("Artist")).compose(&[TrackDisplayField::Display], " / "),
        "Artist / Song"
    );
}

#[test]
fn display_falls_back_to_title_when_no_field_matches() {
    let parts = DisplayParts {
        path: Path::new("/tmp/file.mp3"),
        title: "Fallback",
        artist: None,
        album: Some("   "),
    };
    assert_eq!(parts.compose(&[TrackDisplayField::Album], " - "), "Fallback");
    assert_eq!(parts.compose(&[TrackDisplayField::Filename], " - "), "file");
}

#[test]
fn scan_filters_non_audio_and_sorts_by_display_case_insensitive() {
    let dir = tempdir().unwrap();

    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let settings = LibrarySettings {
        display_fields: vec![TrackDisplayField::Title],
        ..LibrarySettings::default()
    };
    let tracks = scan_selection(dir.path(), &settings).unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].display, "A");
    assert_eq!(tracks[1].display, "b");
    assert_eq!(tracks[0].duration, None);
}

#[test]
fn scan_skips_hidden_by_default() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join(".hidden.mp3"), b"not real").unwrap();
    fs::write(dir.path().join("visible.mp3"), b"not real").unwrap();

    let tracks = scan_selection(dir.path(), &LibrarySettings::default()).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].display, "visible");

    let settings = LibrarySettings {
        include_hidden: true,
        ..LibrarySettings::default()
    };
    assert_eq!(scan_selection(dir.path(), &settings).unwrap().len(), 2);
}

#[test]
fn scan_respects_recursive_false() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("root.mp3"), b"not real").unwrap();
    let sub = dir.path().join("sub");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("child.mp3"), b"not real").unwrap();

    let settings = LibrarySettings {
        recursive: false,
        display_fields: vec![TrackDisplayField::Filename],
        ..LibrarySettings::default()
    };
    let tracks = scan_selection(dir.path(), &settings).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].display, "root");
}

#[test]
fn selecting_a_single_file_ignores_the_extension_filter() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("voice-memo.opus");
    fs::write(&file, b"not real").unwrap();

    let tracks = scan_selection(&file, &LibrarySettings::default()).unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].path, file);
    assert_eq!(tracks[0].display, "voice-memo");
}

#[test]
fn scan_reports_missing_path() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = scan_selection(&missing, &LibrarySettings::default()).unwrap_err();
    assert!(matches!(err, ScanError::NotFound(p) if p == missing));
}

#[test]
fn expand_home_replaces_leading_tilde_only() {
    let _env = crate::config::tests::env_lock();
    let home = std::env::var_os("HOME").map(PathBuf::from);
    if let Some(home) = home {
        assert_eq!(expand_home("~/Music"), home.join("Music"));
        assert_eq!(expand_home("~"), home);
    }
    assert_eq!(expand_home("~other/x"), PathBuf::from("~other/x"));
    assert_eq!(expand_home(" /abs/path "), PathBuf::from("/abs/path"));
}

#[test]
fn load_selection_plays_first_track() {
    let fake = FakeOutput::new();
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();

    lib.load_selection(vec![t("a"), t("b")], &mut player).unwrap();

    assert_eq!(lib.current_index(), Some(0));
    assert_eq!(opened(&fake), vec![PathBuf::from("/music/a.mp3")]);
    assert_eq!(player.title(), Some("a"));
}

#[test]
fn empty_selection_does_not_load() {
    let fake = FakeOutput::new();
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();

    lib.load_selection(Vec::new(), &mut player).unwrap();

    assert_eq!(lib.current_index(), None);
    assert!(opened(&fake).is_empty());
}

#[test]
fn empty_selection_clears_the_previous_index() {
    let fake = FakeOutput::new();
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();
    lib.load_selection(vec![t("a")], &mut player).unwrap();

    lib.load_selection(Vec::new(), &mut player).unwrap();
    assert_eq!(lib.current_index(), None);
    assert!(lib.is_empty());
    assert_eq!(opened(&fake).len(), 1);

    lib.next(&mut player).unwrap();
    assert_eq!(opened(&fake).len(), 1);
}

#[test]
fn next_wraps_around_to_first_track() {
    let fake = FakeOutput::new();
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();
    lib.load_selection(vec![t("a"), t("b"), t("c")], &mut player)
        .unwrap();
    lib.select_index(2, &mut player).unwrap();

    lib.next(&mut player).unwrap();

    assert_eq!(lib.current_index(), Some(0));
    assert_eq!(
        opened(&fake).last(),
        Some(&PathBuf::from("/music/a.mp3"))
    );
}

#[test]
fn prev_wraps_around_to_last_track() {
    let fake = FakeOutput::new();
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();
    lib.load_selection(vec![t("a"), t("b"), t("c")], &mut player)
        .unwrap();

    lib.prev(&mut player).unwrap();
    assert_eq!(lib.current_index(), Some(2));
    lib.prev(&mut player).unwrap();
    assert_eq!(lib.current_index(), Some(1));
}

#[test]
fn next_without_current_is_a_no_op() {
    let fake = FakeOutput::new();
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();

    lib.next(&mut player).unwrap();
    lib.prev(&mut player).unwrap();

    assert_eq!(lib.current_index(), None);
    assert!(opened(&fake).is_empty());
}

#[test]
fn select_index_out_of_range_is_ignored() {
    let fake = FakeOutput::new();
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();
    lib.load_selection(vec![t("a"), t("b")], &mut player).unwrap();

    lib.select_index(5, &mut player).unwrap();

    assert_eq!(lib.current_index(), Some(0));
    assert_eq!(opened(&fake).len(), 1);
}

#[test]
fn failed_track_keeps_index_so_next_moves_on() {
    let fake = FakeOutput::new();
    fake.state
        .borrow_mut()
        .unreadable
        .insert(PathBuf::from("/music/b.mp3"));
    let mut player = PlaybackController::new(fake.boxed(), 0.8, false);
    let mut lib = Library::new();
    lib.load_selection(vec![t("a"), t("b"), t("c")], &mut player)
        .unwrap();

    assert!(lib.next(&mut player).is_err());
    assert_eq!(lib.current_index(), Some(1));

    lib.next(&mut player).unwrap();
    assert_eq!(lib.current_index(), Some(2));
    assert_eq!(player.title(), Some("c"));
}
