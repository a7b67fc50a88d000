//! Server-rendered HTML pages. All dynamic text is escaped before it is
//! written into the markup.

use html_escape::encode_text;

use super::validation::FieldError;
use crate::db::LookupRecord;

/// Values echoed back into the form inputs on re-render.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormValues<'a> {
    pub lyrics: &'a str,
    pub artist_name: &'a str,
    pub genre: &'a str,
}

fn page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <title>{}</title>\n\
         </head>\n\
         <body>\n\
         {}\
         </body>\n\
         </html>\n",
        encode_text(title),
        body
    )
}

pub fn form_page(
    values: &FormValues<'_>,
    errors: &[FieldError],
    results: Option<&[String; 3]>,
) -> String {
    let mut body = String::new();

    body.push_str("<h1>Tunebuddy</h1>\n");

    if !errors.is_empty() {
        body.push_str("<ul class=\"errors\">\n");
        for error in errors {
            body.push_str(&format!(
                "<li data-field=\"{}\">{}</li>\n",
                encode_text(error.field),
                encode_text(&error.message)
            ));
        }
        body.push_str("</ul>\n");
    }

    body.push_str("<form method=\"post\" action=\"/\">\n");
    body.push_str(
        "<label for=\"lyrics\">Tell me the lyrics you remember, even if it's just a few, \
         and I'll try my best to find your song!</label>\n",
    );
    body.push_str(&format!(
        "<input type=\"text\" id=\"lyrics\" name=\"lyrics\" value=\"{}\" \
         autocomplete=\"off\" placeholder=\"Do re mi fa so la ti do... \">\n",
        encode_text(values.lyrics)
    ));
    body.push_str("<label for=\"artist_name\">Artist Name:</label>\n");
    body.push_str(&format!(
        "<input type=\"text\" id=\"artist_name\" name=\"artist_name\" value=\"{}\" \
         autocomplete=\"off\" placeholder=\"Optional\">\n",
        encode_text(values.artist_name)
    ));
    body.push_str("<label for=\"genre\">Genre:</label>\n");
    body.push_str(&format!(
        "<input type=\"text\" id=\"genre\" name=\"genre\" value=\"{}\" \
         autocomplete=\"off\" placeholder=\"Optional\">\n",
        encode_text(values.genre)
    ));
    body.push_str("<button type=\"submit\">Find My Tune!</button>\n");
    body.push_str("</form>\n");

    if let Some(candidates) = results {
        body.push_str("<h2>Here's what I found:</h2>\n");
        body.push_str("<ol class=\"results\">\n");
        for candidate in candidates {
            body.push_str(&format!("<li>{}</li>\n", encode_text(candidate)));
        }
        body.push_str("</ol>\n");
    }

    body.push_str("<p><a href=\"/db\">Browse past lookups</a></p>\n");

    page("Home", &body)
}

pub fn db_page(records: &[LookupRecord]) -> String {
    let mut body = String::new();

    body.push_str("<h1>Past Lookups</h1>\n");

    if records.is_empty() {
        body.push_str("<p>No lookups recorded yet.</p>\n");
    } else {
        body.push_str("<table>\n<thead>\n<tr>");
        body.push_str("<th>Lyrics</th><th>Artist</th><th>Genre</th>");
        body.push_str("<th>First Match</th><th>Second Match</th><th>Third Match</th>");
        body.push_str("</tr>\n</thead>\n<tbody>\n");

        for record in records {
            body.push_str(&format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                encode_text(&record.lyrics),
                encode_text(&record.artist_name),
                encode_text(&record.genre),
                encode_text(&record.first_possible_song),
                encode_text(&record.second_possible_song),
                encode_text(&record.third_possible_song),
            ));
        }

        body.push_str("</tbody>\n</table>\n");
    }

    body.push_str("<p><a href=\"/\">Back to search</a></p>\n");

    page("Database", &body)
}
