//! # Specialist Guesser Module
//!
//! Maps a free-text complaint to an advisory specialist recommendation using
//! ordered keyword groups. The result is a hint for the user, not a diagnosis.

/// Body-system groups checked by the guesser, in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Specialty {
    RedFlag,
    Digestive,
    Dental,
    EarNoseThroat,
    Eyes,
    CardioRespiratory,
    Neuro,
    Musculoskeletal,
    Dermatological,
    Urological,
    Gynecological,
    Pediatric,
    Psychological,
    General,
}

/// Recommendation used when no keyword group matches
pub const DEFAULT_ADVICE: &str =
    "Начни с семейного врача (ģimenes ārsts). Если станет хуже, звони 113.";

struct KeywordGroup {
    specialty: Specialty,
    /// Stems matched anywhere in the text
    keywords: &'static [&'static str],
    /// Short words that only count as whole words ("нос" but not "носок")
    words: &'static [&'static str],
    advice: &'static str,
}

// Order matters: the first group with a hit wins.
const GROUPS: &[KeywordGroup] = &[
    KeywordGroup {
        specialty: Specialty::RedFlag,
        keywords: &[
            "не могу дышать",
            "задыха",
            "потерял сознание",
            "потеряла сознание",
            "потеря сознания",
            "без сознания",
            "кровотечени",
            "боль в груди",
            "давит в груди",
            "инсульт",
            "инфаркт",
            "перекосило",
            "онемела",
            "онемело",
            "судорог",
            "не хочу жить",
            "can't breathe",
            "chest pain",
            "unconscious",
        ],
        words: &[],
        advice: "🚨 Это может быть опасно. Звони 113 прямо сейчас или езжай в приёмное отделение.",
    },
    KeywordGroup {
        specialty: Specialty::Digestive,
        keywords: &[
            "живот", "тошн", "рвот", "понос", "диаре", "изжог", "желуд", "запор", "stomach",
        ],
        words: &[],
        advice: "Похоже на пищеварение: семейный врач, при необходимости гастроэнтеролог.",
    },
    KeywordGroup {
        specialty: Specialty::Dental,
        keywords: &["зуб", "десн", "челюст", "tooth"],
        words: &[],
        advice: "Нужен стоматолог (zobārsts). При сильной боли и отёке ищи дежурного стоматолога.",
    },
    KeywordGroup {
        specialty: Specialty::EarNoseThroat,
        keywords: &[
            "горло", "горле", "насморк", "заложен", "гаймор", "ангин", "отит",
        ],
        words: &["ухо", "уха", "ухе", "уши", "ушах", "ушей", "нос", "носа", "носу", "носом"],
        advice: "Похоже на ЛОР-проблему: отоларинголог (LOR ārsts) или семейный врач.",
    },
    KeywordGroup {
        specialty: Specialty::Eyes,
        keywords: &["глаз", "зрени", "ячмен", "конъюнктив"],
        words: &[],
        advice: "Нужен окулист (acu ārsts).",
    },
    KeywordGroup {
        specialty: Specialty::CardioRespiratory,
        keywords: &[
            "сердц", "сердеч", "давлен", "пульс", "кашел", "кашля", "кашляю", "одышк", "астм",
            "бронх", "пневмон",
        ],
        words: &[],
        advice: "Сердце и дыхание: семейный врач, дальше кардиолог или пульмонолог.",
    },
    KeywordGroup {
        specialty: Specialty::Neuro,
        keywords: &["голов", "мигрен", "неврал", "headache"],
        words: &[],
        advice: "Голова и нервы: семейный врач, при повторении невролог (neirologs).",
    },
    KeywordGroup {
        specialty: Specialty::Musculoskeletal,
        keywords: &[
            "спин", "поясниц", "сустав", "колен", "перелом", "вывих", "растяжен", "ушиб", "шея",
            "шею", "плеч",
        ],
        words: &[],
        advice: "Мышцы и суставы: травматолог (traumatologs) при травме, иначе семейный врач.",
    },
    KeywordGroup {
        specialty: Specialty::Dermatological,
        keywords: &["сып", "кожа", "коже", "кожи", "зуд", "чеш", "аллерг", "прыщ", "ожог", "крапивниц"],
        words: &[],
        advice: "Кожа: дерматолог (dermatologs). При отёке лица или трудности дыхания звони 113.",
    },
    KeywordGroup {
        specialty: Specialty::Urological,
        keywords: &["мочеисп", "моча", "мочи", "почк", "цистит"],
        words: &[],
        advice: "Похоже на урологию: семейный врач или уролог.",
    },
    KeywordGroup {
        specialty: Specialty::Gynecological,
        keywords: &["беремен", "месячн", "менструац", "гинеколог", "выделени"],
        words: &[],
        advice: "Нужен гинеколог (ginekologs).",
    },
    KeywordGroup {
        specialty: Specialty::Pediatric,
        keywords: &["ребен", "ребён", "малыш", "младен", "грудничк", "сына", "сыну", "дочк", "дочь"],
        words: &[],
        advice: "Для ребёнка: педиатр или семейный врач ребёнка.",
    },
    KeywordGroup {
        specialty: Specialty::Psychological,
        keywords: &["тревог", "паник", "депресс", "бессонниц", "стресс", "не могу спать"],
        words: &[],
        advice: "Стоит поговорить с психотерапевтом или семейным врачом. Ты не один.",
    },
    KeywordGroup {
        specialty: Specialty::General,
        keywords: &[
            "температур", "жар", "озноб", "простуд", "грипп", "слабост", "ломот", "fever",
        ],
        words: &[],
        advice: "Похоже на простуду или вирус: семейный врач. Пей больше жидкости.",
    },
];

fn find_group(text: &str) -> Option<&'static KeywordGroup> {
    let normalized = text.trim().to_lowercase();
    if normalized.is_empty() {
        return None;
    }

    let words: Vec<&str> = normalized
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .collect();

    GROUPS.iter().find(|group| {
        group
            .keywords
            .iter()
            .any(|keyword| normalized.contains(keyword))
            || group.words.iter().any(|word| words.contains(word))
    })
}

/// Return the matched keyword group for a complaint, if any
pub fn classify_complaint(text: &str) -> Option<Specialty> {
    find_group(text).map(|group| group.specialty)
}

/// Guess which specialist fits the complaint
///
/// Falls back to [`DEFAULT_ADVICE`] when nothing matches.
pub fn guess_specialist(text: &str) -> &'static str {
    find_group(text)
        .map(|group| group.advice)
        .unwrap_or(DEFAULT_ADVICE)
}

/// Advice string for a given specialty
pub fn advice_for(specialty: Specialty) -> &'static str {
    GROUPS
        .iter()
        .find(|group| group.specialty == specialty)
        .map(|group| group.advice)
        .unwrap_or(DEFAULT_ADVICE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toothache_goes_to_dentist() {
        assert_eq!(classify_complaint("болит зуб"), Some(Specialty::Dental));
        assert_eq!(guess_specialist("болит зуб"), advice_for(Specialty::Dental));
    }

    #[test]
    fn test_case_and_whitespace_are_ignored() {
        assert_eq!(classify_complaint("   БОЛИТ ЖИВОТ  "), Some(Specialty::Digestive));
    }

    #[test]
    fn test_red_flag_wins_over_other_groups() {
        let text = "болит зуб, живот и не могу дышать";
        assert_eq!(classify_complaint(text), Some(Specialty::RedFlag));
        assert_eq!(guess_specialist(text), advice_for(Specialty::RedFlag));
    }

    #[test]
    fn test_first_group_in_order_wins() {
        // digestive is checked before general
        assert_eq!(
            classify_complaint("температура и тошнит"),
            Some(Specialty::Digestive)
        );
    }

    #[test]
    fn test_dry_cough_is_not_an_ear_problem() {
        assert_eq!(
            classify_complaint("сухой кашель"),
            Some(Specialty::CardioRespiratory)
        );
    }

    #[test]
    fn test_short_ent_words_match_whole_words_only() {
        assert_eq!(classify_complaint("болит нос"), Some(Specialty::EarNoseThroat));
        assert_eq!(classify_complaint("Нос заложен!"), Some(Specialty::EarNoseThroat));
        assert_eq!(classify_complaint("стреляет в ухе"), Some(Specialty::EarNoseThroat));
        assert_eq!(classify_complaint("меня душит кашель"), Some(Specialty::CardioRespiratory));
        assert_eq!(classify_complaint("натёр ногу, дырка в носке"), None);
    }

    #[test]
    fn test_unknown_text_falls_back_to_family_doctor() {
        assert_eq!(classify_complaint("плохо"), None);
        assert_eq!(guess_specialist("плохо"), DEFAULT_ADVICE);
        assert_eq!(guess_specialist(""), DEFAULT_ADVICE);
    }
}
