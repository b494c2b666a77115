//! Prompt construction.
//!
//! A pure total function over the closed request enums: every
//! (task, tone, length, language, persona) combination maps to a fixed
//! template plus the literal source text. No I/O, no fallback branches
//! for unrecognized values; the enums make those unrepresentable.

use crate::types::{Language, LengthClass, Persona, Task, Tone};

/// Build the model prompt for a validated request.
///
/// `language` must already be resolved; `Auto` is treated as English.
pub fn build_prompt(
    task: Task,
    tone: Tone,
    length: LengthClass,
    language: Language,
    persona: Persona,
    text: &str,
) -> String {
    let tone_line = tone_instruction(tone, language);
    let length_line = length_instruction(task, length, language);
    let persona_line = persona_instruction(persona, language);
    let task_block = task_template(task, language);

    match language {
        Language::Turkish => format!(
            "{task_block}\n\n{tone_line}\n{length_line}\n{persona_line}\n\n\
             İşlenecek metin:\n{text}\n\nÇıktı:",
        ),
        _ => format!(
            "{task_block}\n\n{tone_line}\n{length_line}\n{persona_line}\n\n\
             Source text:\n{text}\n\nOutput:",
        ),
    }
}

fn task_template(task: Task, language: Language) -> &'static str {
    match (language, task) {
        (Language::Turkish, Task::Summary) => {
            "Sen uzman bir içerik analistisin. Aşağıdaki metni özetle.\n\
             Format:\n• Ana noktalar madde madde\n• Kapanış paragrafı"
        }
        (Language::Turkish, Task::Youtube) => {
            "Sen profesyonel bir YouTube senaristisin. Aşağıdaki içerikten video senaryosu yaz.\n\
             Bölümler: GİRİŞ (hook), ANA İÇERİK (3 bölüm), KAPANIŞ ve çağrı."
        }
        (Language::Turkish, Task::Shorts) => {
            "Sen kısa video uzmanısın. Aşağıdaki içerikten 30-60 saniyelik Shorts senaryosu yaz.\n\
             Bölümler: AÇILIŞ (ilk 3 saniye), ANA MESAJ, KAPANIŞ ve hashtag önerileri."
        }
        (Language::Turkish, Task::Social) => {
            "Sen sosyal medya editörüsün. Aşağıdaki içerikten üç platform gönderisi yaz\n\
             (Twitter/X, LinkedIn, Instagram), her biri platformun üslubuna uygun."
        }
        (Language::Turkish, Task::Seo) => {
            "Sen SEO uzmanısın. Aşağıdaki içerik için SEO paketi hazırla:\n\
             başlık önerisi, meta açıklama, 8-12 anahtar kelime ve içerik taslağı."
        }
        (_, Task::Summary) => {
            "You are an expert content analyst. Summarize the source text.\n\
             Format:\n• Key points as bullets\n• A closing paragraph with the main takeaways"
        }
        (_, Task::Youtube) => {
            "You are a professional YouTube scriptwriter. Turn the source text into a video script.\n\
             Sections: HOOK, INTRO, MAIN CONTENT (3 segments), OUTRO with a call to action."
        }
        (_, Task::Shorts) => {
            "You are a short-form video expert. Turn the source text into a 30-60 second Shorts script.\n\
             Sections: OPENING (first 3 seconds), MAIN MESSAGE, CLOSING plus hashtag suggestions."
        }
        (_, Task::Social) => {
            "You are a social media editor. Turn the source text into three platform posts\n\
             (Twitter/X, LinkedIn, Instagram), each matching the platform's voice."
        }
        (_, Task::Seo) => {
            "You are an SEO specialist. Produce an SEO package for the source text:\n\
             a title suggestion, a meta description, 8-12 keywords, and a content outline."
        }
    }
}

fn tone_instruction(tone: Tone, language: Language) -> &'static str {
    match (language, tone) {
        (Language::Turkish, Tone::Neutral) => "Üslup: açık ve tarafsız.",
        (Language::Turkish, Tone::Casual) => "Üslup: samimi ve günlük.",
        (Language::Turkish, Tone::Energetic) => "Üslup: enerjik ve sürükleyici.",
        (Language::Turkish, Tone::Academic) => "Üslup: resmi ve akademik.",
        (_, Tone::Neutral) => "Tone: clear and objective.",
        (_, Tone::Casual) => "Tone: friendly and conversational.",
        (_, Tone::Energetic) => "Tone: engaging and enthusiastic.",
        (_, Tone::Academic) => "Tone: formal and scholarly.",
    }
}

fn length_instruction(task: Task, length: LengthClass, language: Language) -> &'static str {
    match (language, task, length) {
        (Language::Turkish, Task::Youtube, LengthClass::Short) => "Hedef: 5-7 dakikalık video.",
        (Language::Turkish, Task::Youtube, LengthClass::Medium) => "Hedef: 8-12 dakikalık video.",
        (Language::Turkish, Task::Youtube, LengthClass::Long) => "Hedef: 12-18 dakikalık video.",
        (Language::Turkish, _, LengthClass::Short) => "Uzunluk: kısa ve öz.",
        (Language::Turkish, _, LengthClass::Medium) => "Uzunluk: orta, dengeli detay.",
        (Language::Turkish, _, LengthClass::Long) => "Uzunluk: uzun ve detaylı.",
        (_, Task::Youtube, LengthClass::Short) => "Target: a 5-7 minute video.",
        (_, Task::Youtube, LengthClass::Medium) => "Target: an 8-12 minute video.",
        (_, Task::Youtube, LengthClass::Long) => "Target: a 12-18 minute video.",
        (_, _, LengthClass::Short) => "Length: short and concise.",
        (_, _, LengthClass::Medium) => "Length: medium, balanced detail.",
        (_, _, LengthClass::Long) => "Length: long and thorough.",
    }
}

fn persona_instruction(persona: Persona, language: Language) -> &'static str {
    match (language, persona) {
        (Language::Turkish, Persona::Generic) => "Bakış açısı: genel içerik üreticisi.",
        (Language::Turkish, Persona::Educator) => "Bakış açısı: sabırlı bir eğitmen.",
        (Language::Turkish, Persona::Marketer) => "Bakış açısı: ikna edici bir pazarlamacı.",
        (Language::Turkish, Persona::Storyteller) => "Bakış açısı: bir hikaye anlatıcısı.",
        (_, Persona::Generic) => "Voice: a general content creator.",
        (_, Persona::Educator) => "Voice: a patient educator.",
        (_, Persona::Marketer) => "Voice: a persuasive marketer.",
        (_, Persona::Storyteller) => "Voice: a storyteller.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_source_text() {
        let prompt = build_prompt(
            Task::Summary,
            Tone::Neutral,
            LengthClass::Medium,
            Language::English,
            Persona::Generic,
            "the article body",
        );
        assert!(prompt.contains("the article body"));
        assert!(prompt.contains("Summarize"));
    }

    #[test]
    fn test_turkish_templates_selected() {
        let prompt = build_prompt(
            Task::Summary,
            Tone::Casual,
            LengthClass::Short,
            Language::Turkish,
            Persona::Generic,
            "metin",
        );
        assert!(prompt.contains("özetle"));
        assert!(prompt.contains("İşlenecek metin"));
    }

    #[test]
    fn test_total_over_enum_product() {
        // Every combination renders without panicking and embeds the text.
        for task in Task::ALL {
            for tone in Tone::ALL {
                for length in LengthClass::ALL {
                    for language in Language::ALL {
                        for persona in Persona::ALL {
                            let prompt =
                                build_prompt(task, tone, length, language, persona, "body");
                            assert!(prompt.contains("body"));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_distinct_tasks_produce_distinct_prompts() {
        let summary = build_prompt(
            Task::Summary,
            Tone::Neutral,
            LengthClass::Medium,
            Language::English,
            Persona::Generic,
            "x",
        );
        let seo = build_prompt(
            Task::Seo,
            Tone::Neutral,
            LengthClass::Medium,
            Language::English,
            Persona::Generic,
            "x",
        );
        assert_ne!(summary, seo);
    }
}
