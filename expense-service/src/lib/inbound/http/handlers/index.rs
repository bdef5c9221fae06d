use axum::response::Html;

/// Public routes shown on the landing page: (method, path, description).
const ROUTES: [(&str, &str, &str); 4] = [
    ("POST", "/register", "Register a new user"),
    ("POST", "/login", "Login a user and get a JWT"),
    ("GET", "/expenses", "Get all expenses for the authenticated user"),
    ("POST", "/expenses", "Add a new expense for the authenticated user"),
];

const TITLE: &str = "Expense Tracker API";

pub async fn index() -> Html<String> {
    Html(render_index())
}

fn render_index() -> String {
    let rows: String = ROUTES
        .iter()
        .map(|(method, path, description)| {
            format!(
                "      <tr><td>{}</td><td><code>{}</code></td><td>{}</td></tr>\n",
                method, path, description
            )
        })
        .collect();

    format!(
        "<!DOCTYPE html>\n\
         <html>\n\
         <head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n\
         <h1>{title}</h1>\n\
         <table>\n\
         <thead><tr><th>Method</th><th>Route</th><th>Description</th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n\
         </table>\n\
         </body>\n\
         </html>\n",
        title = TITLE,
        rows = rows
    )
}
