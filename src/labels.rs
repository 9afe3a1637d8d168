//! Display labels for each period, in English and Arabic.
//!
//! The built-in names can be overridden per venue through `labels.english.*`
//! and `labels.arabic.*` configuration keys.

use std::collections::HashMap;

use crate::common::constants::{LABELS_ARABIC_PREFIX, LABELS_ENGLISH_PREFIX};
use crate::config::RuleConfig;
use crate::core::period::PeriodKey;

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub english: String,
    pub arabic: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Labels {
    entries: HashMap<PeriodKey, Label>,
}

impl Default for Labels {
    fn default() -> Self {
        let entries = PeriodKey::ALL
            .into_iter()
            .map(|key| {
                let (english, arabic) = default_label(key);
                (
                    key,
                    Label {
                        english: english.to_string(),
                        arabic: Some(arabic.to_string()),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}

impl Labels {
    /// Default labels with any configured overrides applied.
    pub fn from_config(config: &RuleConfig) -> Self {
        let mut labels = Self::default();
        for (name, value) in config.section(LABELS_ENGLISH_PREFIX) {
            if let Some(key) = PeriodKey::from_key(name) {
                labels.set_english(key, value);
            }
        }
        for (name, value) in config.section(LABELS_ARABIC_PREFIX) {
            if let Some(key) = PeriodKey::from_key(name) {
                labels.set_arabic(key, value);
            }
        }
        labels
    }

    pub fn set_english(&mut self, key: PeriodKey, value: impl Into<String>) {
        self.entry(key).english = value.into();
    }

    /// An empty value removes the Arabic label.
    pub fn set_arabic(&mut self, key: PeriodKey, value: impl Into<String>) {
        let value = value.into();
        self.entry(key).arabic = (!value.trim().is_empty()).then_some(value);
    }

    pub fn english(&self, key: PeriodKey) -> &str {
        self.entries
            .get(&key)
            .map(|l| l.english.as_str())
            .unwrap_or_else(|| default_label(key).0)
    }

    pub fn arabic(&self, key: PeriodKey) -> Option<&str> {
        self.entries.get(&key).and_then(|l| l.arabic.as_deref())
    }

    fn entry(&mut self, key: PeriodKey) -> &mut Label {
        self.entries.entry(key).or_insert_with(|| Label {
            english: default_label(key).0.to_string(),
            arabic: None,
        })
    }
}

fn default_label(key: PeriodKey) -> (&'static str, &'static str) {
    match key {
        PeriodKey::Fajr => ("Fajr", "الفجر"),
        PeriodKey::Sunrise => ("Sunrise", "الشروق"),
        PeriodKey::Ishraq => ("Ishraq", "الإشراق"),
        PeriodKey::Dhuhr => ("Dhuhr", "الظهر"),
        PeriodKey::Asr => ("Asr", "العصر"),
        PeriodKey::Maghrib => ("Maghrib", "المغرب"),
        PeriodKey::Isha => ("Isha", "العشاء"),
        PeriodKey::Jummah => ("Jummah", "الجمعة"),
        PeriodKey::Makrooh => ("Makrooh", "مكروه"),
        PeriodKey::Nafl => ("Nafl", "نفل"),
    }
}
