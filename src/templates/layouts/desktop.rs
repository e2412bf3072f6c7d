use maud::{html, Markup, PreEscaped, DOCTYPE};

const PAGE_STYLE: &str = "
  body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Helvetica, Arial, sans-serif; margin: 24px; }
  h1 { margin-bottom: 12px; }
  .meta { color: #666; font-size: 14px; margin-bottom: 16px; }
  table { background: #fff; }
  th, td { vertical-align: top; }
  a { color: #0b5; }
";

pub fn desktop_layout(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                title { (title) }
                style { (PreEscaped(PAGE_STYLE)) }
            }
            body {
                (content)
            }
        }
    }
}
