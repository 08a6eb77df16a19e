// Constants used throughout calcsites

// Input and output locations
pub const DEFAULT_KEYWORDS_FILE: &str = "kw.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "output";
pub const DEFAULT_TEMPLATES_DIR: &str = "templates";
pub const DEFAULT_MAX_KEYWORDS: usize = 10;

// Canonical domain used in sitemap, robots and canonical links
pub const DEFAULT_SITE_DOMAIN: &str = "https://calculatorusa123.netlify.app";

// Pacing, in seconds
pub const DEFAULT_SEARCH_DELAY: u64 = 2;
pub const DEFAULT_DEPLOY_DELAY: u64 = 2;

// Slugs longer than this are cut
pub const MAX_SLUG_LEN: usize = 50;

// Deployment tool
pub const DEFAULT_DEPLOY_COMMAND: &str = "netlify";
pub const DEFAULT_TOKEN_ENV: &str = "NETLIFY_AUTH_TOKEN";
pub const DEFAULT_INSTALL_COMMAND: &str = "npm install -g netlify-cli";
pub const DEPLOY_MESSAGE_PREFIX: &str = "Auto-deploy: ";
pub const URL_MARKER: &str = "URL:";

// Bundle file names
pub const INDEX_HTML: &str = "index.html";
pub const STYLE_CSS: &str = "style.css";
pub const CALCULATOR_STYLE_CSS: &str = "calculator-style.css";
pub const SITEMAP_XML: &str = "sitemap.xml";
pub const ROBOTS_TXT: &str = "robots.txt";
pub const NETLIFY_TOML: &str = "netlify.toml";

// Static pages copied from the templates directory when present
pub const STATIC_PAGES: [&str; 4] = ["privacy.html", "terms.html", "contact.html", "about.html"];

// Content type every keyword is analyzed as
pub const CALCULATOR: &str = "calculator";

// Environment variables
pub const ENV_CONFIG_YAML: &str = "CALCSITES_CONFIG_YAML";
pub const ENV_KEYWORDS_FILE: &str = "CALCSITES_KEYWORDS_FILE";
pub const ENV_MAX_KEYWORDS: &str = "CALCSITES_MAX_KEYWORDS";
pub const ENV_OUTPUT_DIR: &str = "CALCSITES_OUTPUT_DIR";
pub const ENV_TEMPLATES_DIR: &str = "CALCSITES_TEMPLATES_DIR";
pub const ENV_SITE_DOMAIN: &str = "CALCSITES_SITE_DOMAIN";
pub const ENV_LAYOUT: &str = "CALCSITES_LAYOUT";
pub const ENV_SEARCH_DELAY: &str = "CALCSITES_SEARCH_DELAY";
pub const ENV_DEPLOY_DELAY: &str = "CALCSITES_DEPLOY_DELAY";
pub const ENV_DEPLOY_CMD: &str = "CALCSITES_DEPLOY_CMD";
pub const ENV_TOKEN_ENV: &str = "CALCSITES_TOKEN_ENV";
pub const ENV_NO_MESSAGE: &str = "CALCSITES_NO_MESSAGE";
pub const ENV_NO_INSTALL: &str = "CALCSITES_NO_INSTALL";
pub const ENV_INSTALL_CMD: &str = "CALCSITES_INSTALL_CMD";
pub const ENV_DRY_RUN: &str = "CALCSITES_DRY_RUN";
pub const ENV_DEBUG: &str = "CALCSITES_DEBUG";
pub const ENV_CTXOUT: &str = "CALCSITES_CTXOUT";
