//! Rendered text outputs derived from session state.
//!
//! The chat line, report text, and citation line are pure functions of the
//! resolved classification plus the form fields; they regenerate on every
//! read and never feed back into resolution.

use crate::session::ReportSession;
use crate::submit::AuthorContext;

/// Prefix inserted before the source name when the source is a U.S. person.
const USPER_PREFIX: &str = "(USPER) ";

/// Defang URLs: every case-insensitive occurrence of `http` becomes `hxxp`.
pub fn defang(s: &str) -> String {
    let lower = s.to_ascii_lowercase();
    let mut out = String::with_capacity(s.len());
    let mut last = 0;
    for (idx, _) in lower.match_indices("http") {
        if idx < last {
            continue;
        }
        out.push_str(&s[last..idx]);
        out.push_str("hxxp");
        last = idx + 4;
    }
    out.push_str(&s[last..]);
    out
}

/// Sanitize a string for titles and filenames: whitespace and any other
/// non-alphanumeric run collapses to a single underscore, trimmed at both
/// ends.
pub fn slugify(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_underscore = false;
    for ch in s.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch);
            prev_underscore = false;
        } else if !prev_underscore {
            out.push('_');
            prev_underscore = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// Build a DTG from the form's date (`DDMMMYY`) and time (`HHmm`, UTC)
/// fields: `DDHHMMZMMMYY`. Returns `None` when either input is too short.
pub fn make_dtg(date: &str, time: &str) -> Option<String> {
    if date.len() < 7 || time.len() < 4 {
        return None;
    }
    let dd = date.get(0..2)?;
    let mmm = date.get(2..5)?;
    let yy = date.get(5..7)?;
    let hh = time.get(0..2)?;
    let mi = time.get(2..4)?;
    Some(format!("{dd}{hh}{mi}Z{}{yy}", mmm.to_ascii_uppercase()))
}

/// Strip a trailing " User" from a source-platform label ("X User" → "X").
pub fn clean_source_type(platform: &str) -> String {
    let trimmed = platform.trim();
    if trimmed.to_ascii_lowercase().ends_with("user") {
        trimmed[..trimmed.len() - 4].trim_end().to_string()
    } else {
        trimmed.to_string()
    }
}

fn usper_prefix(session: &ReportSession) -> &'static str {
    if session.flags().usper {
        USPER_PREFIX
    } else {
        ""
    }
}

/// The one-line chat message for the reporting channel.
pub fn chat_line(session: &ReportSession, author: &AuthorContext) -> String {
    let meta = session.meta();
    let oc = session.resolved_overall().marking();
    let cc = session.resolved_collector().marking();
    let dtg = make_dtg(&meta.date_of_information, &meta.time).unwrap_or_default();

    let line = format!(
        "({oc}) {dtg} ({mgrs}) {src_type} {usper}{src_name} | (U) {action} {body} \
         (MGRS FOR REFERENCE ONLY. PUBLICLY AVAILABLE INFORMATION: SOURCE IS UNVERIFIED) | \
         {cin} | ({cc}) COLLECTOR COMMENT: {comment} ({oc})",
        mgrs = meta.mgrs,
        src_type = meta.source_type,
        usper = usper_prefix(session),
        src_name = meta.source_name,
        action = meta.did_what,
        body = session.report_body().text,
        cin = author.user_id,
        comment = session.source_description().text,
    );
    line.trim().to_string()
}

/// The multi-line report output.
pub fn report_text(session: &ReportSession) -> String {
    let meta = session.meta();
    let oc = session.resolved_overall().marking();
    let cc = session.resolved_collector().marking();
    let dtg = make_dtg(&meta.date_of_information, &meta.time).unwrap_or_default();

    let text = format!(
        "({oc}) On {dtg}, {src_type} {usper}{src_name}\n{action} {body}\n({mgrs})\n\n\
         ({cc}) COLLECTOR COMMENT: {desc}",
        src_type = meta.source_type,
        usper = usper_prefix(session),
        src_name = meta.source_name,
        action = meta.did_what,
        body = session.report_body().text,
        mgrs = meta.mgrs,
        desc = session.source_description().text,
    );
    text.trim().to_string()
}

/// The one-line citation. Published sources also carry the article title
/// and author.
pub fn citation_line(session: &ReportSession) -> String {
    let meta = session.meta();
    let oc = session.resolved_overall().marking();
    let dtg = make_dtg(&meta.date_of_information, &meta.time).unwrap_or_default();
    let src_type = clean_source_type(&meta.source_type);
    let usper = usper_prefix(session);
    let us_person = if session.flags().usper || session.flags().uspi {
        "YES"
    } else {
        "NO"
    };

    let line = if meta.did_what == "published" {
        format!(
            "({oc}) {src_type} | {usper}{src_name} | {title} | {article_author} | {uid} | {dtg} | \
             UNCLASSIFIED | U.S. Person: {us_person}",
            src_name = meta.source_name,
            title = meta.article_title,
            article_author = meta.article_author,
            uid = meta.uid,
        )
    } else {
        format!(
            "({oc}) {src_type} | {usper}{src_name} | {uid} | {dtg} | \
             UNCLASSIFIED | U.S. Person: {us_person}",
            src_name = meta.source_name,
            uid = meta.uid,
        )
    };
    line.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::ClassificationLevel::{Cui, CuiRel};
    use crate::session::ReportSession;
    use crate::term::RestrictedTerm;

    fn author() -> AuthorContext {
        AuthorContext {
            user_id: "C123".into(),
            display_name: "reporter".into(),
            admin: false,
        }
    }

    #[test]
    fn defang_replaces_every_scheme_occurrence() {
        assert_eq!(defang("http://x and HTTPS://y"), "hxxp://x and hxxpS://y");
        assert_eq!(defang("no links here"), "no links here");
        assert_eq!(defang(""), "");
    }

    #[test]
    fn slugify_squeezes_and_trims() {
        assert_eq!(slugify("  12JAN26 Baghdad / IZ  "), "12JAN26_Baghdad_IZ");
        assert_eq!(slugify("a---b"), "a_b");
        assert_eq!(slugify("___"), "");
    }

    #[test]
    fn dtg_assembles_from_date_and_time() {
        assert_eq!(make_dtg("12jan26", "0930"), Some("120930ZJAN26".into()));
        assert_eq!(make_dtg("12JAN26", "093"), None);
        assert_eq!(make_dtg("12JAN", "0930"), None);
    }

    #[test]
    fn clean_source_type_strips_user_suffix() {
        assert_eq!(clean_source_type("X User"), "X");
        assert_eq!(clean_source_type(" Telegram User "), "Telegram");
        assert_eq!(clean_source_type("Website"), "Website");
    }

    #[test]
    fn chat_line_carries_markings_and_usper_prefix() {
        let mut session = ReportSession::new(vec![RestrictedTerm::new("rocket", Cui)]);
        session.update_meta(|m| {
            m.date_of_information = "12JAN26".into();
            m.time = "0930".into();
            m.mgrs = "38SMB12345678".into();
            m.source_name = "channel-7".into();
        });
        session.set_report_body("a rocket was seen");
        session.set_usper(true);

        let line = chat_line(&session, &author());
        assert!(line.starts_with("(CUI) 120930ZJAN26 (38SMB12345678)"));
        assert!(line.contains("(USPER) channel-7"));
        assert!(line.contains("| C123 |"));
        assert!(line.ends_with("(CUI)"));
    }

    #[test]
    fn citation_variants_by_did_what() {
        let mut session = ReportSession::new(Vec::new());
        session.update_meta(|m| {
            m.source_type = "X User".into();
            m.source_name = "handle".into();
            m.article_title = "Title".into();
            m.article_author = "Author".into();
            m.uid = "u-1".into();
            m.did_what = "published".into();
        });
        let line = citation_line(&session);
        assert!(line.contains("X | handle | Title | Author | u-1"));
        assert!(line.ends_with("U.S. Person: NO"));

        session.update_meta(|m| m.did_what = "reported".into());
        let line = citation_line(&session);
        assert!(!line.contains("Title"));
        assert!(line.contains("X | handle | u-1"));
    }

    #[test]
    fn overall_marking_reflects_image_join() {
        let mut session = ReportSession::new(Vec::new());
        session.attach_image("p.png", "image/png", vec![0]);
        session.apply_stamped_image(crate::image::StampedImage {
            data: vec![0],
            content_type: "image/png".into(),
            level: CuiRel,
        });
        let line = report_text(&session);
        assert!(line.starts_with("(CUI//REL TO USA, FVEY)"));
    }
}
