//! CJK font installation so Chinese labels render.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};

const CJK_FONT_NAME: &str = "cjk";

const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
];

pub fn candidate_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    explicit
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_CJK_FONTS.iter().map(PathBuf::from))
        .collect()
}

fn read_first(candidates: &[PathBuf]) -> Option<(PathBuf, Vec<u8>)> {
    candidates.iter().find_map(|path| match fs::read(path) {
        Ok(bytes) => Some((path.clone(), bytes)),
        Err(err) => {
            tracing::trace!(path = %path.display(), "font candidate unavailable: {err}");
            None
        }
    })
}

/// Registers the first readable candidate as a fallback for both font
/// families. Returns the path that was installed.
pub fn install_cjk_font(ctx: &egui::Context, explicit: Option<&Path>) -> Option<PathBuf> {
    let Some((path, bytes)) = read_first(&candidate_paths(explicit)) else {
        tracing::warn!("no CJK font found; Chinese text may not render");
        return None;
    };

    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        CJK_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_owned(bytes)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT_NAME.to_owned());
    }
    ctx.set_fonts(fonts);

    tracing::info!(path = %path.display(), "installed CJK font");
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_font_is_tried_first() {
        let explicit = PathBuf::from("/opt/fonts/custom.ttf");
        let candidates = candidate_paths(Some(&explicit));
        assert_eq!(candidates.first(), Some(&explicit));
        assert_eq!(candidates.len(), SYSTEM_CJK_FONTS.len() + 1);
    }

    #[test]
    fn unreadable_candidates_are_skipped() {
        let dir = std::env::temp_dir().join(format!("recruit-fonts-{}", std::process::id()));
        fs::create_dir_all(&dir).expect("temp dir");
        let font = dir.join("fake.ttf");
        fs::write(&font, b"font-bytes").expect("write font");

        let found = read_first(&[dir.join("missing.ttf"), font.clone()]);
        assert_eq!(found, Some((font, b"font-bytes".to_vec())));

        let _ = fs::remove_dir_all(&dir);
    }
}
