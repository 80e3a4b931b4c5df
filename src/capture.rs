//! Writing canvases out as PNG files.

use std::fs::{self, File};
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use time::OffsetDateTime;
use time::macros::format_description;

use crate::error::Result;

/// `<dir>/<name>_<YYYYMMDD_HHMMSS>.png`
pub fn capture_path(dir: &Path, name: &str, at: OffsetDateTime) -> PathBuf {
    let stamp = at
        .format(format_description!(
            "[year][month][day]_[hour][minute][second]"
        ))
        .unwrap_or_else(|_| at.unix_timestamp().to_string());
    dir.join(format!("{name}_{stamp}.png"))
}

/// Local time when the offset can be determined, UTC otherwise.
pub fn now() -> OffsetDateTime {
    OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc())
}

/// Creates a file that did not exist before, appending `_1`, `_2`, ... to the
/// timestamped name when several captures land in the same second.
fn create_unique(dir: &Path, name: &str, at: OffsetDateTime) -> io::Result<(File, PathBuf)> {
    let base = capture_path(dir, name, at);
    let mut path = base.clone();
    let mut n = 0u32;
    loop {
        match File::create_new(&path) {
            Ok(file) => return Ok((file, path)),
            Err(err) if err.kind() == io::ErrorKind::AlreadyExists => {
                n += 1;
                let stem = base.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
                path = base.with_file_name(format!("{stem}_{n}.png"));
            }
            Err(err) => return Err(err),
        }
    }
}

/// Encodes packed RGB bytes as an 8-bit PNG under `dir`, creating it if needed.
pub fn save_rgb(dir: &Path, name: &str, width: u32, height: u32, rgb: &[u8]) -> Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let (file, path) = create_unique(dir, name, now())?;
    let mut encoder = png::Encoder::new(BufWriter::new(file), width, height);
    encoder.set_color(png::ColorType::Rgb);
    encoder.set_depth(png::BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgb)?;
    writer.finish()?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn test_capture_path_format() {
        let at = datetime!(2024-03-07 09:05:01 UTC);
        let path = capture_path(Path::new("output"), "Pixel Smoke", at);
        assert_eq!(path, PathBuf::from("output/Pixel Smoke_20240307_090501.png"));
    }

    #[test]
    fn test_same_second_captures_get_suffixes() {
        let tmp = tempfile::tempdir().unwrap();
        let at = datetime!(2024-03-07 09:05:01 UTC);

        let (_, first) = create_unique(tmp.path(), "x", at).unwrap();
        let (_, second) = create_unique(tmp.path(), "x", at).unwrap();
        let (_, third) = create_unique(tmp.path(), "x", at).unwrap();

        assert_eq!(first, tmp.path().join("x_20240307_090501.png"));
        assert_eq!(second, tmp.path().join("x_20240307_090501_1.png"));
        assert_eq!(third, tmp.path().join("x_20240307_090501_2.png"));
    }

    #[test]
    fn test_back_to_back_saves_keep_both_files() {
        let tmp = tempfile::tempdir().unwrap();
        let a = save_rgb(tmp.path(), "x", 1, 1, &[1, 2, 3]).unwrap();
        let b = save_rgb(tmp.path(), "x", 1, 1, &[4, 5, 6]).unwrap();

        assert_ne!(a, b);
        assert_eq!(fs::read_dir(tmp.path()).unwrap().count(), 2);
    }

    #[test]
    fn test_save_creates_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("output");

        let path = save_rgb(&dir, "shot", 2, 1, &[255, 0, 0, 0, 0, 255]).unwrap();

        assert!(path.starts_with(&dir));
        let file_name = path.file_name().unwrap().to_str().unwrap();
        assert!(file_name.starts_with("shot_"));
        assert!(file_name.ends_with(".png"));
        // shot_YYYYMMDD_HHMMSS.png
        assert_eq!(file_name.len(), "shot_".len() + 15 + ".png".len());

        let bytes = fs::read(&path).unwrap();
        assert_eq!(&bytes[..8], &[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
    }

    #[test]
    fn test_save_rgb_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let rgb = [10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120];
        let path = save_rgb(tmp.path(), "rt", 2, 2, &rgb).unwrap();

        let decoder = png::Decoder::new(File::open(path).unwrap());
        let mut reader = decoder.read_info().unwrap();
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).unwrap();
        assert_eq!((info.width, info.height), (2, 2));
        assert_eq!(info.color_type, png::ColorType::Rgb);
        assert_eq!(&buf[..info.buffer_size()], &rgb);
    }

    #[test]
    fn test_save_fails_when_dir_is_a_file() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("output");
        fs::write(&blocker, b"not a directory").unwrap();

        let err = save_rgb(&blocker, "x", 1, 1, &[0, 0, 0]).unwrap_err();
        assert!(matches!(err, crate::Error::Io(_)));
    }
}
