//! Calculator landing page markup

use serde_json::json;

use crate::error::Result;

/// Values substituted into the landing page.
///
/// `keyword` and `title` are raw text; they are escaped here, never by the caller.
#[derive(Debug, Clone)]
pub struct PageVars<'a> {
    pub keyword: &'a str,
    pub title: &'a str,
    pub canonical_url: &'a str,
    pub stylesheet: &'a str,
    pub year: i32,
}

/// Escape text for use in HTML element content and quoted attribute values
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// schema.org `WebApplication` description, safe to embed in a `<script>` block
fn structured_data(vars: &PageVars<'_>) -> Result<String> {
    let data = json!({
        "@context": "https://schema.org",
        "@type": "WebApplication",
        "name": vars.title,
        "description": format!("Free online {} calculator", vars.keyword),
        "url": vars.canonical_url,
        "applicationCategory": "UtilityApplication",
        "offers": {
            "@type": "Offer",
            "price": "0",
            "priceCurrency": "USD"
        }
    });
    let text = serde_json::to_string_pretty(&data)?;
    // \u003c keeps "</script>" and "<!--" out of the block
    Ok(text.replace('<', "\\u003c"))
}

pub fn render_page(vars: &PageVars<'_>) -> Result<String> {
    let keyword = escape_html(vars.keyword);
    let title = escape_html(vars.title);
    let canonical = escape_html(vars.canonical_url);
    let stylesheet = escape_html(vars.stylesheet);
    let ld_json = structured_data(vars)?;
    let year = vars.year;

    Ok(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <meta name="description" content="Free online {keyword} tool. Fast, accurate and easy to use. Calculate your {keyword} instantly online.">
    <meta name="keywords" content="{keyword}, calculator, online tool, free calculator">
    <meta name="author" content="Calculator Pro">
    <meta property="og:title" content="{title} - Free Online Calculator">
    <meta property="og:description" content="Calculate your {keyword} quickly and easily with our free online tool.">
    <meta property="og:type" content="website">
    <meta property="og:url" content="{canonical}">
    <title>{title} - Free Online Calculator</title>
    <link rel="canonical" href="{canonical}">
    <link rel="stylesheet" href="{stylesheet}">
    <script type="application/ld+json">
{ld_json}
    </script>
</head>
<body>
    <header>
        <nav>
            <div class="container">
                <h1 class="logo">🧮 Calculator Pro</h1>
                <ul class="nav-menu">
                    <li><a href="index.html">Home</a></li>
                    <li><a href="about.html">About</a></li>
                    <li><a href="privacy.html">Privacy</a></li>
                    <li><a href="contact.html">Contact</a></li>
                </ul>
            </div>
        </nav>
    </header>

    <main class="container">
        <div class="hero">
            <h1>{title}</h1>
            <p class="subtitle">Fast, Free &amp; Accurate Online Calculator</p>
        </div>

        <div class="calculator-box">
            <h2>Calculate Your {title}</h2>

            <div class="input-group">
                <label for="value1">First Value:</label>
                <input type="number" id="value1" step="any" placeholder="Enter first value">
            </div>

            <div class="input-group">
                <label for="value2">Second Value:</label>
                <input type="number" id="value2" step="any" placeholder="Enter second value">
            </div>

            <div class="input-group">
                <label for="value3">Third Value (Optional):</label>
                <input type="number" id="value3" step="any" placeholder="Enter third value">
            </div>

            <div class="button-group">
                <button onclick="calculate()" class="btn-primary">Calculate</button>
                <button onclick="resetForm()" class="btn-secondary">Reset</button>
            </div>

            <div id="result" class="result-box" style="display:none;">
                <h3>Result:</h3>
                <div id="resultValue" class="result-value">0</div>
            </div>
        </div>

        <div class="content-grid">
            <div class="content-card">
                <h2>About This {title}</h2>
                <p>Our {keyword} provides quick and accurate calculations for your needs. Whether you're a student, professional, or just need fast results, this tool is designed to help you.</p>
                <p>All calculations are performed instantly in your browser. No data is sent to any server.</p>
            </div>

            <div class="content-card">
                <h2>✨ Key Features</h2>
                <ul class="feature-list">
                    <li>✅ Completely free to use</li>
                    <li>⚡ Instant results</li>
                    <li>📱 Mobile-friendly interface</li>
                    <li>🎯 Accurate calculations</li>
                    <li>🔒 Privacy-focused (no data collection)</li>
                    <li>💯 No registration required</li>
                </ul>
            </div>

            <div class="content-card">
                <h2>📖 How to Use</h2>
                <ol>
                    <li>Enter your values in the input fields</li>
                    <li>Click the "Calculate" button</li>
                    <li>View your instant result below</li>
                    <li>Use "Reset" to clear and start over</li>
                </ol>
            </div>

            <div class="content-card">
                <h2>❓ Frequently Asked Questions</h2>

                <details>
                    <summary>Is this calculator free?</summary>
                    <p>Yes! This {keyword} is completely free with no hidden fees or registration required.</p>
                </details>

                <details>
                    <summary>Do I need to install anything?</summary>
                    <p>No installation needed. Just open your browser and start calculating.</p>
                </details>

                <details>
                    <summary>Is my data safe?</summary>
                    <p>Absolutely. All calculations happen in your browser. We don't collect, store, or transmit any of your data.</p>
                </details>

                <details>
                    <summary>Can I use this on my phone?</summary>
                    <p>Yes! The calculator is fully responsive and works on smartphones, tablets and desktop computers.</p>
                </details>
            </div>
        </div>

        <div class="cta-section">
            <h2>Need More Calculators?</h2>
            <p>Explore our full collection of free online tools</p>
            <a href="index.html" class="btn-cta">Browse All Calculators</a>
        </div>
    </main>

    <footer>
        <div class="container">
            <div class="footer-grid">
                <div class="footer-col">
                    <h3>Quick Links</h3>
                    <ul>
                        <li><a href="index.html">Home</a></li>
                        <li><a href="about.html">About Us</a></li>
                        <li><a href="sitemap.xml">Sitemap</a></li>
                    </ul>
                </div>
                <div class="footer-col">
                    <h3>Legal</h3>
                    <ul>
                        <li><a href="privacy.html">Privacy Policy</a></li>
                        <li><a href="terms.html">Terms of Service</a></li>
                        <li><a href="contact.html">Contact Us</a></li>
                    </ul>
                </div>
                <div class="footer-col">
                    <h3>Connect</h3>
                    <p>Have questions? <a href="contact.html">Get in touch</a></p>
                </div>
            </div>
            <div class="footer-bottom">
                <p>&copy; {year} Calculator Pro. All rights reserved.</p>
            </div>
        </div>
    </footer>

    <script>
        function readValue(id) {{
            return parseFloat(document.getElementById(id).value) || 0;
        }}

        function calculate() {{
            const result = readValue('value1') + readValue('value2') + readValue('value3');
            document.getElementById('resultValue').textContent = result.toFixed(2);
            document.getElementById('result').style.display = 'block';
        }}

        function resetForm() {{
            document.getElementById('value1').value = '';
            document.getElementById('value2').value = '';
            document.getElementById('value3').value = '';
            document.getElementById('resultValue').textContent = '0';
            document.getElementById('result').style.display = 'none';
        }}
    </script>
</body>
</html>
"#
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(keyword: &'a str, title: &'a str) -> PageVars<'a> {
        PageVars {
            keyword,
            title,
            canonical_url: "https://calc.test/",
            stylesheet: "style.css",
            year: 2026,
        }
    }

    #[test]
    fn escape_covers_markup_characters() {
        assert_eq!(escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;");
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn page_embeds_title_and_keyword() {
        let html = render_page(&vars("bmi calculator", "Bmi Calculator")).unwrap();
        assert!(html.contains("<title>Bmi Calculator - Free Online Calculator</title>"));
        assert!(html.contains(r#"content="bmi calculator, calculator, online tool, free calculator""#));
        assert!(html.contains(r#"<meta property="og:title" content="Bmi Calculator - Free Online Calculator">"#));
        assert!(html.contains(r#"<link rel="canonical" href="https://calc.test/">"#));
        assert!(html.contains(r#"<link rel="stylesheet" href="style.css">"#));
        assert!(html.contains("&copy; 2026 Calculator Pro"));
    }

    #[test]
    fn author_does_not_repeat_calculator() {
        let html = render_page(&vars("bmi calculator", "Bmi Calculator")).unwrap();
        assert!(html.contains(r#"<meta name="author" content="Calculator Pro">"#));
        assert!(!html.contains("Calculator Calculator"));
    }

    #[test]
    fn form_and_script_are_present() {
        let html = render_page(&vars("tip", "Tip")).unwrap();
        for id in ["value1", "value2", "value3"] {
            assert!(html.contains(&format!(r#"id="{}""#, id)));
        }
        assert!(html.contains("parseFloat(document.getElementById(id).value) || 0"));
        assert!(html.contains("result.toFixed(2)"));
        assert!(html.contains("<details>"));
    }

    #[test]
    fn hostile_keyword_is_escaped_everywhere() {
        let keyword = r#"<script>alert("x")</script> & co"#;
        let html = render_page(&vars(keyword, keyword)).unwrap();
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;alert(&quot;x&quot;)&lt;/script&gt; &amp; co"));
        // Inside the JSON-LD block the keyword is JSON text with '<' escaped
        assert!(html.contains(r#"\u003cscript\u003ealert(\"x\")\u003c/script\u003e & co"#));
    }

    #[test]
    fn structured_data_is_valid_json() {
        let text = structured_data(&vars("loan <b>", "Loan <B>")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["@type"], "WebApplication");
        assert_eq!(value["name"], "Loan <B>");
        assert_eq!(value["offers"]["price"], "0");
    }
}
