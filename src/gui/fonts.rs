//! System font loading for the CJK interface languages.
//!
//! egui's bundled fonts cover Latin text only, so the dialog pulls a CJK face
//! from the system font directory for the selected language.

use crate::i18n::Language;
use eframe::egui;
use std::sync::Arc;

/// One named font with its candidate locations, tried in order.
struct FontSource {
    name: &'static str,
    paths: &'static [&'static str],
}

const YAHEI: FontSource = FontSource {
    name: "Microsoft YaHei",
    paths: &["C:\\Windows\\Fonts\\msyh.ttc"],
};

const NOTO_CJK: FontSource = FontSource {
    name: "Noto Sans CJK",
    paths: &[
        "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
        "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    ],
};

const WQY: FontSource = FontSource {
    name: "WenQuanYi Micro Hei",
    paths: &["/usr/share/fonts/truetype/wqy/wqy-microhei.ttc"],
};

/// Loads the system fonts needed to render `language`.
///
/// Japanese faces sit slightly high in egui's layout, so they get a small
/// vertical offset.
pub fn load_fonts(ctx: &egui::Context, language: Language) {
    if language == Language::English {
        return;
    }

    let mut fonts = egui::FontDefinitions::default();
    let y_offset = match language {
        Language::Japanese => 0.3,
        _ => 0.0,
    };

    let mut loaded_count = 0;
    for source in font_sources(language) {
        let Some(data) = source.paths.iter().find_map(|path| std::fs::read(path).ok()) else {
            continue;
        };

        let data = if y_offset != 0.0 {
            egui::FontData::from_owned(data).tweak(egui::FontTweak {
                y_offset_factor: y_offset,
                ..Default::default()
            })
        } else {
            egui::FontData::from_owned(data)
        };
        fonts
            .font_data
            .insert(source.name.to_string(), Arc::new(data));

        for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
            fonts
                .families
                .entry(family)
                .or_default()
                .push(source.name.to_string());
        }
        loaded_count += 1;
    }

    if loaded_count == 0 {
        log::warn!(
            "no system fonts loaded for {:?}, CJK characters may not display correctly",
            language
        );
        return;
    }

    ctx.set_fonts(fonts);
}

/// Font sources for `language`, most preferred first.
fn font_sources(language: Language) -> Vec<FontSource> {
    let mut sources = match language {
        Language::SimplifiedChinese => vec![YAHEI],
        Language::TraditionalChinese => vec![FontSource {
            name: "Microsoft JhengHei",
            paths: &["C:\\Windows\\Fonts\\msjh.ttc"],
        }],
        Language::Japanese => vec![
            FontSource {
                name: "Yu Gothic UI",
                paths: &["C:\\Windows\\Fonts\\YuGothM.ttc"],
            },
            FontSource {
                name: "Meiryo",
                paths: &["C:\\Windows\\Fonts\\meiryo.ttc"],
            },
        ],
        Language::English => Vec::new(),
    };
    if language != Language::English {
        sources.push(NOTO_CJK);
        sources.push(WQY);
    }
    sources
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cjk_languages_have_fallbacks() {
        for &lang in &Language::all()[1..] {
            let names: Vec<_> = font_sources(lang).iter().map(|s| s.name).collect();
            assert!(names.contains(&"Noto Sans CJK"), "{:?}", lang);
        }
        assert!(font_sources(Language::English).is_empty());
    }
}
