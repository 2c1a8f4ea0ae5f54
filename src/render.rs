// src/render.rs
use crate::models::DeckExport;

pub fn render_deck_text(d: &DeckExport) -> String {
    let mut out = String::new();
    out.push_str(&format!("Deck: {} ({} cards)\n", d.subject, d.cards.len()));

    for c in &d.cards {
        out.push_str(&format!("\n{}. {}\n", c.rank, c.title));
        if !c.description.trim().is_empty() {
            out.push_str(&format!("   {}\n", c.description.trim().replace('\n', "\n   ")));
        }
    }

    out
}

pub fn render_deck_markdown(d: &DeckExport) -> String {
    let mut md = String::new();
    md.push_str(&format!("# {}\n\n", d.subject));

    for c in &d.cards {
        match &c.url {
            Some(url) => md.push_str(&format!("## [{}]({})\n", c.title, url)),
            None => md.push_str(&format!("## {}\n", c.title)),
        }
        md.push_str(&format!("{}\n\n", c.description.trim()));
    }

    md
}
