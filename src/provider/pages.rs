use std::io::ErrorKind;

use crate::util::color::Rgb;
use crate::util::config::DEFAULT_THEME_COLOR;
use crate::util::template;

use super::{Error, OAuthManager};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Index,
    Privacy,
}

impl Page {
    pub fn file_name(self) -> &'static str {
        match self {
            Page::Index => "index.html",
            Page::Privacy => "privacy.html",
        }
    }
}

impl OAuthManager {
    pub async fn render_page(&self, page: Page) -> Result<String, Error> {
        let path = self.config.frontend_dir().join(page.file_name());
        let source = tokio::fs::read_to_string(&path).await.map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::TemplateMissing(page.file_name().to_string()),
            _ => Error::Io(e),
        })?;

        Ok(template::render(&source, self.page_values()))
    }

    fn page_values(&self) -> Vec<(&'static str, String)> {
        let branding = self.config.branding();
        let theme = Rgb::parse(&branding.theme_color)
            .or_else(|| Rgb::parse(DEFAULT_THEME_COLOR))
            .unwrap_or(Rgb::BLACK);

        vec![
            ("APP_TITLE", branding.app_title),
            ("LOGO_PATH", branding.logo_path),
            ("THEME_COLOR", theme.to_hex()),
            ("THEME_COLOR_DARK", theme.darken(0.25).to_hex()),
            ("THEME_COLOR_LIGHT", theme.lighten(0.85).to_hex()),
            ("COMPANY_NAME", self.config.company_name().to_string()),
            ("PRIVACY_CONTACT_EMAIL", self.config.privacy_contact_email()),
            ("DOMAIN", self.config.domain().to_string()),
        ]
    }
}
