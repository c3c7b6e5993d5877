use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;

// @module: Text encoding resolution from a country code

/// Encoding used when neither the locale table nor the environment help
pub const FALLBACK_ENCODING: &str = "utf-8";

/// Locale aliases keyed by lowercase country/language code
///
/// Mirrors the entries of the POSIX locale alias table that matter for
/// subtitle files. Values are full locale names; only the codeset after the
/// last '.' is used.
static LOCALE_ALIASES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("af", "af_ZA.ISO8859-1"),
        ("ar", "ar_AA.ISO8859-6"),
        ("be", "be_BY.CP1251"),
        ("bg", "bg_BG.CP1251"),
        ("br", "br_FR.ISO8859-1"),
        ("bs", "bs_BA.ISO8859-2"),
        ("c", "C"),
        ("ca", "ca_ES.ISO8859-1"),
        ("cs", "cs_CZ.ISO8859-2"),
        ("cy", "cy_GB.ISO8859-1"),
        ("da", "da_DK.ISO8859-1"),
        ("de", "de_DE.ISO8859-1"),
        ("el", "el_GR.ISO8859-7"),
        ("en", "en_US.ISO8859-1"),
        ("eo", "eo_XX.ISO8859-3"),
        ("es", "es_ES.ISO8859-1"),
        ("et", "et_EE.ISO8859-15"),
        ("eu", "eu_ES.ISO8859-1"),
        ("fa", "fa_IR.UTF-8"),
        ("fi", "fi_FI.ISO8859-15"),
        ("fo", "fo_FO.ISO8859-1"),
        ("fr", "fr_FR.ISO8859-1"),
        ("ga", "ga_IE.ISO8859-1"),
        ("gl", "gl_ES.ISO8859-1"),
        ("he", "he_IL.ISO8859-8"),
        ("hi", "hi_IN.ISCII-DEV"),
        ("hr", "hr_HR.ISO8859-2"),
        ("hu", "hu_HU.ISO8859-2"),
        ("id", "id_ID.ISO8859-1"),
        ("is", "is_IS.ISO8859-1"),
        ("it", "it_IT.ISO8859-1"),
        ("iw", "he_IL.ISO8859-8"),
        ("ja", "ja_JP.eucJP"),
        ("ka", "ka_GE.GEORGIAN-ACADEMY"),
        ("kl", "kl_GL.ISO8859-1"),
        ("ko", "ko_KR.eucKR"),
        ("lt", "lt_LT.ISO8859-13"),
        ("lv", "lv_LV.ISO8859-13"),
        ("mk", "mk_MK.ISO8859-5"),
        ("ms", "ms_MY.ISO8859-1"),
        ("mt", "mt_MT.ISO8859-3"),
        ("nl", "nl_NL.ISO8859-1"),
        ("nn", "nn_NO.ISO8859-1"),
        ("no", "no_NO.ISO8859-1"),
        ("oc", "oc_FR.ISO8859-1"),
        ("pl", "pl_PL.ISO8859-2"),
        ("pt", "pt_PT.ISO8859-1"),
        ("ro", "ro_RO.ISO8859-2"),
        ("ru", "ru_RU.UTF-8"),
        ("sk", "sk_SK.ISO8859-2"),
        ("sl", "sl_SI.ISO8859-2"),
        ("sq", "sq_AL.ISO8859-2"),
        ("sr", "sr_RS.UTF-8"),
        ("sv", "sv_SE.ISO8859-1"),
        ("th", "th_TH.ISO8859-11"),
        ("tr", "tr_TR.ISO8859-9"),
        ("uk", "uk_UA.KOI8-U"),
        ("vi", "vi_VN.TCVN"),
        ("wa", "wa_BE.ISO8859-1"),
        ("zh", "zh_CN.eucCN"),
    ])
});

/// Encoding registry keyed by normalized alias, valued by canonical name
static ENCODING_REGISTRY: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("utf_8", "utf-8"),
        ("utf8", "utf-8"),
        ("u8", "utf-8"),
        ("ascii", "ascii"),
        ("us_ascii", "ascii"),
        ("ansi_x3.4_1968", "ascii"),
        ("iso8859_1", "iso8859-1"),
        ("iso_8859_1", "iso8859-1"),
        ("latin1", "iso8859-1"),
        ("latin_1", "iso8859-1"),
        ("iso8859_2", "iso8859-2"),
        ("iso_8859_2", "iso8859-2"),
        ("latin2", "iso8859-2"),
        ("iso8859_3", "iso8859-3"),
        ("iso_8859_3", "iso8859-3"),
        ("iso8859_5", "iso8859-5"),
        ("iso_8859_5", "iso8859-5"),
        ("cyrillic", "iso8859-5"),
        ("iso8859_6", "iso8859-6"),
        ("iso_8859_6", "iso8859-6"),
        ("arabic", "iso8859-6"),
        ("iso8859_7", "iso8859-7"),
        ("iso_8859_7", "iso8859-7"),
        ("greek", "iso8859-7"),
        ("iso8859_8", "iso8859-8"),
        ("iso_8859_8", "iso8859-8"),
        ("hebrew", "iso8859-8"),
        ("iso8859_9", "iso8859-9"),
        ("iso_8859_9", "iso8859-9"),
        ("latin5", "iso8859-9"),
        ("iso8859_11", "iso8859-11"),
        ("iso_8859_11", "iso8859-11"),
        ("thai", "iso8859-11"),
        ("iso8859_13", "iso8859-13"),
        ("iso_8859_13", "iso8859-13"),
        ("iso8859_15", "iso8859-15"),
        ("iso_8859_15", "iso8859-15"),
        ("latin9", "iso8859-15"),
        ("cp1250", "cp1250"),
        ("windows_1250", "cp1250"),
        ("cp1251", "cp1251"),
        ("windows_1251", "cp1251"),
        ("cp1252", "cp1252"),
        ("windows_1252", "cp1252"),
        ("koi8_r", "koi8-r"),
        ("koi8_u", "koi8-u"),
        ("eucjp", "euc_jp"),
        ("euc_jp", "euc_jp"),
        ("ujis", "euc_jp"),
        ("euckr", "euc_kr"),
        ("euc_kr", "euc_kr"),
        ("euccn", "gb2312"),
        ("euc_cn", "gb2312"),
        ("gb2312", "gb2312"),
        ("gbk", "gbk"),
        ("gb18030", "gb18030"),
        ("big5", "big5"),
        ("shift_jis", "shift_jis"),
        ("sjis", "shift_jis"),
        ("tis_620", "tis-620"),
        ("tis620", "tis-620"),
    ])
});

/// Normalize an encoding alias for registry lookups
fn normalize_alias(alias: &str) -> String {
    alias
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Look an encoding name up in the registry, returning its canonical name
pub fn lookup_encoding(name: &str) -> Option<&'static str> {
    ENCODING_REGISTRY.get(normalize_alias(name).as_str()).copied()
}

/// Codeset of a locale name such as `de_DE.ISO-8859-15@euro`
fn locale_codeset(locale: &str) -> Option<&str> {
    let without_modifier = locale.split('@').next().unwrap_or(locale);
    without_modifier.rsplit_once('.').map(|(_, codeset)| codeset)
}

/// Preferred encoding from locale variable values given in precedence order
///
/// The first non-empty value decides, even when it names no codeset.
fn preferred_encoding_from<'a>(locales: impl IntoIterator<Item = &'a str>) -> &'static str {
    locales
        .into_iter()
        .find(|value| !value.is_empty())
        .and_then(locale_codeset)
        .and_then(lookup_encoding)
        .unwrap_or(FALLBACK_ENCODING)
}

/// Derive the process's preferred encoding from the locale environment
fn preferred_encoding_from_env() -> &'static str {
    let values: Vec<String> = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .collect();
    preferred_encoding_from(values.iter().map(String::as_str))
}

/// Maps country codes to text encodings
///
/// The preferred encoding is captured once at construction, so every
/// fallback within one resolver returns the same value.
#[derive(Debug, Clone)]
pub struct EncodingResolver {
    preferred: String,
}

impl EncodingResolver {
    /// Create a resolver that falls back to the locale environment's encoding
    pub fn new() -> Self {
        Self::with_preferred(preferred_encoding_from_env())
    }

    /// Create a resolver with an explicit fallback encoding
    pub fn with_preferred(preferred: &str) -> Self {
        Self {
            preferred: preferred.to_string(),
        }
    }

    /// The encoding returned whenever a country code cannot be resolved
    pub fn preferred(&self) -> &str {
        &self.preferred
    }

    /// Resolve a country code to an encoding name. Never fails.
    pub fn resolve(&self, country_code: &str) -> String {
        let key = country_code.trim().to_lowercase();

        if let Some(locale_name) = LOCALE_ALIASES.get(key.as_str()) {
            let alias = locale_name.rsplit('.').next().unwrap_or(locale_name).to_lowercase();
            if let Some(canonical) = lookup_encoding(&alias) {
                debug!("Encoding for '{}' resolved to {}", country_code, canonical);
                return canonical.to_string();
            }
            debug!("Locale '{}' has no known codec, using {}", locale_name, self.preferred);
        }

        self.preferred.clone()
    }
}

impl Default for EncodingResolver {
    fn default() -> Self {
        Self::new()
    }
}
