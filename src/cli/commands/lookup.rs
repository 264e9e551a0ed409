//! Film lookup command.

use kinolink::config::Settings;
use kinolink::engine::{FilmFinder, FilmQuery};
use kinolink::http_client::HttpClient;
use kinolink::render::film_card;

/// Resolve the query, find links, and print the result.
pub async fn cmd_lookup(
    settings: &Settings,
    client: HttpClient,
    query: &FilmQuery,
    json: bool,
) -> anyhow::Result<()> {
    let finder = FilmFinder::new(settings, client);

    let Some(film) = finder.resolve(query).await else {
        if json {
            print_json(&serde_json::json!({ "film": null, "links": null }))?;
        } else {
            println!("{}", not_found_message(query));
        }
        return Ok(());
    };

    let links = finder.find_links(&film).await;

    if json {
        print_json(&serde_json::json!({ "film": film, "links": links }))?;
    } else {
        print!("{}", film_card(&film, &links));
    }
    Ok(())
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn not_found_message(query: &FilmQuery) -> &'static str {
    match query {
        FilmQuery::Random => "Could not find a random film. Try again!",
        FilmQuery::ByName(_) => "Could not find this film.",
    }
}
