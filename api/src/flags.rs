/// Static asset bundle holding one PNG per team flag code.
///
/// No existence check is made: an unknown code simply yields a URL that does
/// not resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagAssets {
    base_url: String,
}

impl FlagAssets {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into() }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, code: &str) -> String {
        flag_url(&self.base_url, code)
    }
}

pub fn flag_url(base_url: &str, code: &str) -> String {
    format!("{base_url}/flags/{code}.png")
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://cdn.example.org/resource/TeamFlags";

    #[test]
    fn builds_flag_path() {
        assert_eq!(
            FlagAssets::new(BASE).url("MAR"),
            "https://cdn.example.org/resource/TeamFlags/flags/MAR.png"
        );
    }

    #[test]
    fn empty_code_still_yields_a_url() {
        assert_eq!(flag_url(BASE, ""), format!("{BASE}/flags/.png"));
    }

    #[test]
    fn distinct_codes_give_distinct_urls() {
        let flags = FlagAssets::new(BASE);
        let codes = ["ARG", "FRA", "CRO", "MAR", "AR", "G", "ARG2"];
        let mut urls: Vec<String> = codes.iter().map(|c| flags.url(c)).collect();
        urls.sort();
        urls.dedup();
        assert_eq!(urls.len(), codes.len());
    }
}
