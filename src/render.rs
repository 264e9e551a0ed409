//! Plain-text film card for terminal output.

use crate::engine::FoundLinks;
use crate::models::CanonicalFilm;

/// Render a film and its links the way a chat message would show them.
pub fn film_card(film: &CanonicalFilm, links: &FoundLinks) -> String {
    let title = film.title().unwrap_or("Untitled");
    let mut out = match film.year {
        Some(year) => format!("{} ({})\n", title, year),
        None => format!("{}\n", title),
    };

    let alternative = film
        .alternative_name
        .as_deref()
        .map(str::trim)
        .filter(|alt| !alt.is_empty() && Some(*alt) != film.title());
    if let Some(alt) = alternative {
        out.push_str(alt);
        out.push('\n');
    }
    out.push('\n');

    let description = film
        .description
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .unwrap_or("No description available");
    out.push_str(description);
    out.push_str("\n\n");

    out.push_str(&match film.score("kp") {
        Some((rating, votes)) => format!("Kinopoisk rating: {}/10 ({} votes)\n", rating, votes),
        None => "Rating not found\n".to_string(),
    });
    out.push_str(&format!("Poster: {}\n", film.poster_url));

    if !links.is_empty() {
        out.push_str("\nWatch links:\n");
        for (label, url) in links.iter() {
            out.push_str(&format!("  {}: {}\n", label, url));
        }
    }

    out
}
