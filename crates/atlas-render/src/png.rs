use crate::layout::{summary_lines, CANVAS_HEIGHT, CANVAS_WIDTH};
use ab_glyph::{FontVec, PxScale};
use async_trait::async_trait;
use atlas_core::{CountryRecord, MirrorStatus, RenderError, SummaryRenderer};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use std::path::{Path, PathBuf};
use tracing::debug;

const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Font locations probed when no explicit path is configured.
const WELL_KNOWN_FONTS: [&str; 4] = [
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
];

/// First well-known font present on this host, if any.
pub fn locate_font() -> Option<PathBuf> {
    WELL_KNOWN_FONTS
        .iter()
        .map(PathBuf::from)
        .find(|path| path.is_file())
}

/// Writes the summary card as a PNG at a fixed path.
#[derive(Debug)]
pub struct PngSummaryRenderer {
    font: FontVec,
    image_path: PathBuf,
}

impl PngSummaryRenderer {
    /// Loads the font eagerly so a bad path fails at startup, not on the
    /// first refresh.
    pub fn new(
        font_path: impl AsRef<Path>,
        image_path: impl Into<PathBuf>,
    ) -> Result<Self, RenderError> {
        let font_path = font_path.as_ref();
        let bytes = std::fs::read(font_path).map_err(|err| {
            RenderError::Font(format!("{}: {err}", font_path.display()))
        })?;
        let font = FontVec::try_from_vec(bytes).map_err(|err| {
            RenderError::Font(format!("{}: {err}", font_path.display()))
        })?;

        Ok(Self {
            font,
            image_path: image_path.into(),
        })
    }

    pub fn image_path(&self) -> &Path {
        &self.image_path
    }
}

#[async_trait]
impl SummaryRenderer for PngSummaryRenderer {
    async fn render(
        &self,
        top_countries: &[CountryRecord],
        status: &MirrorStatus,
    ) -> Result<(), RenderError> {
        let mut canvas = RgbaImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, WHITE);

        for line in summary_lines(top_countries, status) {
            draw_text_mut(
                &mut canvas,
                BLACK,
                line.x,
                line.y,
                PxScale::from(line.size),
                &self.font,
                &line.text,
            );
        }

        if let Some(parent) = self.image_path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|err| RenderError::Io(format!("{}: {err}", parent.display())))?;
        }
        canvas
            .save(&self.image_path)
            .map_err(|err| RenderError::Io(format!("{}: {err}", self.image_path.display())))?;

        debug!(path = %self.image_path.display(), "summary image written");
        Ok(())
    }
}

/// Renderer used when no usable font is available; refresh cycles proceed
/// without touching the summary card.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRenderer;

#[async_trait]
impl SummaryRenderer for NoopRenderer {
    async fn render(
        &self,
        _top_countries: &[CountryRecord],
        _status: &MirrorStatus,
    ) -> Result<(), RenderError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::Timestamp;

    #[tokio::test]
    async fn bad_font_path_fails_at_construction() {
        let err = PngSummaryRenderer::new("/does/not/exist.ttf", "summary.png").unwrap_err();
        assert!(matches!(err, RenderError::Font(_)));
    }

    // Skips silently on hosts without a well-known font; the layout tests
    // cover the card content either way.
    #[tokio::test]
    async fn renders_a_png_when_a_font_is_available() {
        let Some(font) = locate_font() else {
            return;
        };

        let path = std::env::temp_dir().join("atlas-render-smoke/summary.png");
        let renderer = PngSummaryRenderer::new(font, path.clone()).unwrap();

        let record = CountryRecord {
            name: "Germany".to_string(),
            capital: None,
            region: None,
            population: 100,
            currency_code: Some("EUR".to_string()),
            exchange_rate: Some(0.9),
            estimated_gdp: Some(123_456.78),
            flag_url: None,
            last_refreshed_at: Timestamp::UNIX_EPOCH,
        };
        let status = MirrorStatus {
            total: 1,
            last_refreshed_at: Some(Timestamp::UNIX_EPOCH),
        };

        renderer.render(&[record], &status).await.unwrap();

        let written = image::open(&path).unwrap();
        assert_eq!(written.width(), CANVAS_WIDTH);
        assert_eq!(written.height(), CANVAS_HEIGHT);
        std::fs::remove_file(&path).ok();
    }
}
