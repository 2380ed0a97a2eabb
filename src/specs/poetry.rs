// src/specs/poetry.rs
//! Scraping *spec* for poem pages (`shiwenv_{id}.aspx`) and title search
//! listings.
//!
//! Page shape (content column only):
//! ```text
//! div#sonsyuanwen > div.cont > h1     title
//! div.contson                         body
//! div.contyishang > p, p              translation, notes (each optional)
//! div.sonspic > div.cont a[href]      author link (see `anchor_index`)
//! ```

use tracing::debug;

use super::{Resolution, poetry_id_from_href, author_id_from_href, sonspic_author_href};
use crate::config::consts::{NOTES_LABEL, ROOT_REDIRECT, TRANSLATION_LABEL};
use crate::core::{Node, sanitize};
use crate::data::{AuthorRef, Poetry};
use crate::error::{Result, ScrapeError};

/// Build a [`Poetry`] from the located content column.
///
/// `final_url` is where the request ended up; the site answers unknown ids
/// with a redirect to its root rather than an error status.
pub fn extract<'a, N: Node<'a>>(
    left: N,
    final_url: &str,
    resolution: Resolution<'_>,
) -> Result<Poetry> {
    if final_url == ROOT_REDIRECT {
        return Err(ScrapeError::not_found("no information about this poetry"));
    }

    let title = left
        .find("div#sonsyuanwen")
        .and_then(|s| s.find("div.cont"))
        .and_then(|c| c.find("h1"))
        .map(|h| h.get_text().trim().to_string())
        .ok_or_else(|| ScrapeError::malformed("poem title (div#sonsyuanwen div.cont h1)"))?;

    let content = left
        .find("div.contson")
        .map(|d| sanitize::trim_body(&d.get_text()))
        .ok_or_else(|| ScrapeError::malformed("poem body (div.contson)"))?;

    let (translation, notes) = translation_and_notes(left);

    let author_id = left
        .find("div.sonspic")
        .and_then(sonspic_author_href)
        .and_then(author_id_from_href)
        .ok_or_else(|| ScrapeError::malformed("poem without author link (div.sonspic)"))?;

    let author = match resolution {
        Resolution::Lazy => AuthorRef::Id(author_id),
        Resolution::Eager(lookup) => AuthorRef::Resolved(lookup.lookup(&author_id)?),
    };

    Ok(Poetry::new(title, content, translation, notes, author))
}

/// First paragraph of `div.contyishang` is the translation, second the notes.
///
/// The translation is cut at the first `\r`: the site appends unrelated
/// template text after it. Notes are taken as-is apart from the label.
fn translation_and_notes<'a, N: Node<'a>>(left: N) -> (Option<String>, Option<String>) {
    let paras = left
        .find("div.contyishang")
        .map(|d| d.find_all("p"))
        .unwrap_or_default();

    let translation = paras
        .first()
        .map(|p| clean_translation(&p.get_text()));
    let notes = paras
        .get(1)
        .map(|p| sanitize::strip_label(&p.get_text(), NOTES_LABEL));

    (translation, notes)
}

pub fn clean_translation(raw: &str) -> String {
    let stripped = sanitize::strip_label(raw, TRANSLATION_LABEL);
    s!(sanitize::cut_at(&stripped, '\r'))
}

/// Poem ids from one page of title search results, in page order.
/// Listing entries without a poem link (ads, notices) are skipped.
pub fn search_page<'a, N: Node<'a>>(left: N) -> Vec<String> {
    let mut ids = Vec::new();
    for (i, sons) in left.find_all("div.sons").into_iter().enumerate() {
        let id = sons
            .find("div.cont")
            .and_then(|c| c.find("p"))
            .and_then(|p| p.find("a"))
            .and_then(|a| a.get_attr("href"))
            .and_then(poetry_id_from_href);
        match id {
            Some(id) => ids.push(id),
            None => debug!(item = i, "search listing entry without poem link; skipped"),
        }
    }
    ids
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::html::parse;
    use crate::data::Author;
    use crate::specs::{AuthorLookup, locate};

    const URL: &str = "https://so.gushiwen.cn/shiwenv_45c396367f59.aspx";

    fn page(trans: &str, with_portrait: bool) -> String {
        let portrait = if with_portrait {
            r#"<div class="divimg"><a href="/authorv_b90660e3e492.aspx"><img src="libai.jpg"></a></div>"#
        } else {
            ""
        };
        format!(r#"
            <html><body><div class="main3"><div class="left">
              <div class="sons" id="sonsyuanwen">
                <div class="cont">
                  <h1>静夜思</h1>
                  <p class="source"><a href="/authorv_b90660e3e492.aspx">李白</a></p>
                  <div class="contson" id="contson45c396367f59">&#13;
床前明月光，疑是地上霜。<br />举头望明月，低头思故乡。
                  </div>
                </div>
              </div>
              <div class="sons"><div class="contyishang">{trans}</div></div>
              <div class="sonspic"><div class="cont">
                {portrait}
                <p><a href="/authorv_b90660e3e492.aspx"><b>李白</b></a></p>
                <p>李白（701年－762年），字太白。<a href="/authors/authorvsw_b90660e3e492A1.aspx">►1180篇诗文</a></p>
              </div></div>
            </div></div></body></html>
        "#)
    }

    struct Fixed;
    impl AuthorLookup for Fixed {
        fn lookup(&self, author_id: &str) -> Result<Author> {
            assert_eq!(author_id, "b90660e3e492");
            Ok(Author::new("李白", Some(s!("字太白。")), None))
        }
    }

    struct Missing;
    impl AuthorLookup for Missing {
        fn lookup(&self, author_id: &str) -> Result<Author> {
            Err(ScrapeError::not_found(author_id))
        }
    }

    fn extract_from(html: &str, resolution: Resolution<'_>) -> Result<Poetry> {
        let doc = parse(html);
        let left = locate(doc.root_element())?;
        extract(left, URL, resolution)
    }

    #[test]
    fn title_and_body() {
        let p = extract_from(&page("", false), Resolution::Lazy).unwrap();
        assert_eq!(p.title(), "静夜思");
        assert_eq!(p.content(), "床前明月光，疑是地上霜。举头望明月，低头思故乡。");
        assert_eq!(p.author(), &AuthorRef::Id(s!("b90660e3e492")));
    }

    #[test]
    fn no_paragraphs_means_no_translation_or_notes() {
        let p = extract_from(&page("", false), Resolution::Lazy).unwrap();
        assert_eq!(p.translation(), None);
        assert_eq!(p.notes(), None);
    }

    #[test]
    fn one_paragraph_is_translation() {
        let p = extract_from(&page("<p><strong>译文</strong>床前洒满了月光。</p>", false), Resolution::Lazy).unwrap();
        assert_eq!(p.translation(), Some("床前洒满了月光。"));
        assert_eq!(p.notes(), None);
    }

    #[test]
    fn translation_cut_at_carriage_return_notes_untouched() {
        let trans = "<p>译文只有这部分&#13;模板杂项</p><p>注释床：井栏。&#13;一说卧具。</p>";
        let p = extract_from(&page(trans, false), Resolution::Lazy).unwrap();
        assert_eq!(p.translation(), Some("只有这部分"));
        assert_eq!(p.notes(), Some("床：井栏。\r一说卧具。"));
    }

    #[test]
    fn clean_translation_rules() {
        assert_eq!(clean_translation("译文只有这部分\r模板杂项"), "只有这部分");
        assert_eq!(clean_translation("无标签"), "无标签");
    }

    #[test]
    fn author_anchor_follows_portrait_rule() {
        // with a portrait the first anchor is the image link; both point at the
        // same author here, so check the index through a lookalike fixture
        let with = page("", true).replace(
            r#"<p><a href="/authorv_b90660e3e492.aspx"><b>李白</b></a></p>"#,
            r#"<p><a href="/authorv_second.aspx"><b>李白</b></a></p>"#,
        );
        let p = extract_from(&with, Resolution::Lazy).unwrap();
        assert_eq!(p.author().id(), Some("second"));

        let without = page("", false).replace(
            r#"<p><a href="/authorv_b90660e3e492.aspx"><b>李白</b></a></p>"#,
            r#"<p><a href="/authorv_first.aspx"><b>李白</b></a></p>"#,
        );
        let p = extract_from(&without, Resolution::Lazy).unwrap();
        assert_eq!(p.author().id(), Some("first"));
    }

    #[test]
    fn eager_resolution_embeds_author() {
        let p = extract_from(&page("", false), Resolution::Eager(&Fixed)).unwrap();
        assert_eq!(p.author().resolved().map(|a| a.name()), Some("李白"));
    }

    #[test]
    fn eager_lookup_failure_propagates() {
        let err = extract_from(&page("", false), Resolution::Eager(&Missing)).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn missing_author_link_is_malformed() {
        let html = page("", false).replace("authorv_", "mingju_");
        let err = extract_from(&html, Resolution::Lazy).unwrap_err();
        assert!(matches!(err, ScrapeError::Malformed(_)));
    }

    #[test]
    fn missing_body_is_malformed() {
        let html = page("", false).replace("contson", "contother");
        assert!(matches!(extract_from(&html, Resolution::Lazy), Err(ScrapeError::Malformed(_))));
    }

    #[test]
    fn root_redirect_is_not_found() {
        let doc = parse(&page("", false));
        let left = locate(doc.root_element()).unwrap();
        let err = extract(left, ROOT_REDIRECT, Resolution::Lazy).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn extraction_is_repeatable() {
        let html = page("<p>译文甲</p><p>注释乙</p>", true);
        let a = extract_from(&html, Resolution::Lazy).unwrap();
        let b = extract_from(&html, Resolution::Lazy).unwrap();
        assert_eq!(a, b);
    }

    const LISTING: &str = r#"
        <div class="main3"><div class="left">
          <div class="sons"><div class="cont">
            <p><a href="/shiwenv_45c396367f59.aspx"><b>静夜思</b></a></p>
            <p class="source"><a href="/authorv_b90660e3e492.aspx">李白</a></p>
          </div></div>
          <div class="sons"><div class="cont"><p>广告</p></div></div>
          <div class="sons"><div class="cont">
            <p><a href="https://so.gushiwen.cn/shiwenv_d1a8d7ea2eab.aspx">静夜思</a></p>
          </div></div>
          <div class="sons"><div class="cont">
            <p><a href="/mingju/juv_1.aspx">名句</a></p>
          </div></div>
        </div></div>
    "#;

    #[test]
    fn search_page_keeps_order_and_skips_noise() {
        let doc = parse(LISTING);
        let left = locate(doc.root_element()).unwrap();
        assert_eq!(search_page(left), vec!["45c396367f59", "d1a8d7ea2eab"]);
    }

    #[test]
    fn search_page_empty_listing() {
        let doc = parse(r#"<div class="main3"><div class="left"></div></div>"#);
        let left = locate(doc.root_element()).unwrap();
        assert!(search_page(left).is_empty());
    }
}
