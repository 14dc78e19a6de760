//! Skill Vocabulary: the set of lowercase terms recognized as skills.
//!
//! Built once at startup (compiled-in list or an override file) and shared
//! read-only through `Arc<SkillVocabulary>`.

use std::collections::BTreeSet;
use std::path::Path;

use anyhow::{Context, Result};

/// Built-in vocabulary. Duplicates in this list collapse on load.
pub const DEFAULT_SKILLS: &[&str] = &[
    // Programming languages
    "python", "java", "c", "c++", "c#", "javascript", "typescript", "go", "golang",
    "rust", "ruby", "swift", "kotlin", "scala", "dart", "php", "r", "perl", "objective-c",
    "bash", "shell", "powershell", "haskell", "elixir", "lua", "matlab", "fortran",
    // Frontend frameworks & libraries
    "react", "reactjs", "nextjs", "angular", "vue", "nuxtjs", "svelte", "solidjs",
    "jquery", "bootstrap", "tailwindcss", "chakraui", "materialui", "redux", "mobx",
    "lit", "astro", "vite", "webpack", "parcel", "babel",
    // Backend frameworks
    "node", "express", "nestjs", "fastify", "django", "flask", "fastapi", "spring",
    "springboot", "laravel", "rails", "ruby on rails", "asp.net", "dotnet", "gin", "fiber",
    "echo", "phoenix", "hapi", "adonisjs", "koajs",
    // Databases
    "sql", "postgresql", "mysql", "mariadb", "sqlite", "mongodb", "redis", "oracle",
    "cassandra", "elasticsearch", "dynamodb", "couchdb", "neo4j", "firebase", "supabase",
    "prisma", "typeorm", "sequelize", "hibernate", "mongoose", "realm", "influxdb",
    // Cloud & DevOps
    "aws", "gcp", "azure", "digitalocean", "heroku", "vercel", "netlify", "render",
    "docker", "kubernetes", "terraform", "ansible", "jenkins", "github actions",
    "gitlab ci", "circleci", "travisci", "argo cd", "helm", "prometheus", "grafana",
    "nginx", "apache", "loadbalancer", "cdn", "serverless", "lambda", "cloudformation",
    // Version control & collaboration
    "git", "github", "gitlab", "bitbucket", "svn", "mercurial",
    // Data science & machine learning
    "numpy", "pandas", "scikit-learn", "tensorflow", "pytorch", "keras", "matplotlib",
    "seaborn", "xgboost", "lightgbm", "catboost", "opencv", "nlp", "spacy", "transformers",
    "huggingface", "statsmodels", "jupyter", "notebook", "colab", "data visualization",
    "mlflow", "kubeflow", "pytorch lightning", "deep learning", "computer vision",
    "machine learning", "artificial intelligence", "reinforcement learning",
    // Data engineering & big data
    "hadoop", "spark", "pyspark", "kafka", "airflow", "luigi", "snowflake", "bigquery",
    "databricks", "redshift", "data lake", "data pipeline", "etl", "elt", "presto",
    "hive", "flink", "storm",
    // Mobile & cross-platform
    "react native", "flutter", "swiftui", "android", "ios", "xcode", "kivy", "ionic",
    "cordova", "capacitor",
    // AI / NLP / CV
    "openai", "langchain", "llm", "chatgpt", "gpt", "bert", "gpt-4", "t5", "transformer",
    "yolo", "cnn", "rnn", "gans", "stable diffusion", "speech recognition", "ocr",
    "image classification", "nlp pipeline", "text generation",
    // Testing & QA
    "jest", "mocha", "chai", "enzyme", "cypress", "playwright", "puppeteer", "pytest",
    "unittest", "postman", "newman", "selenium", "robot framework",
    // Security & networking
    "penetration testing", "ethical hacking", "owasp", "burpsuite", "metasploit",
    "firewall", "wireshark", "nmap", "ssl", "tls", "encryption", "jwt", "oauth",
    "sso", "networking", "vpn", "zero trust", "iam",
    // Blockchain & Web3
    "blockchain", "ethereum", "solidity", "web3", "smart contracts", "nft", "defi",
    "metamask", "ethersjs", "hardhat", "truffle", "ipfs", "polygon", "solana",
    // Misc tools
    "restapi", "graphql", "grpc", "websocket", "mqtt", "rabbitmq", "kafka", "celery",
    "redis queue", "microservices", "monorepo", "turborepo", "api gateway",
    "swagger", "openapi", "postman", "insomnia", "linux", "ubuntu", "windows server",
    "macos", "bash scripting", "automation", "devops", "agile", "scrum", "jira",
    "confluence", "figma", "adobe xd", "ui/ux", "design systems",
    // Game development
    "unity", "unreal engine", "godot", "blender", "threejs", "babylonjs",
    // Emerging technologies
    "genai", "rag", "autogen", "agentic ai", "ai agent", "digital twin",
    "iot", "embedded systems", "arduino", "raspberry pi", "robotics", "edge computing",
    // Analytics & BI
    "tableau", "powerbi", "looker", "metabase", "superset", "google data studio",
    // General engineering
    "performance optimization", "scalability", "system design", "api design",
    "distributed systems", "event-driven architecture", "observability", "logging",
    "monitoring", "tracing",
];

/// Immutable, deduplicated set of lowercase skill terms.
///
/// Iteration is sorted, so anything derived from it (extracted skills,
/// matching/missing lists) comes out in a stable order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillVocabulary {
    terms: BTreeSet<String>,
}

impl Default for SkillVocabulary {
    fn default() -> Self {
        Self::from_terms(DEFAULT_SKILLS.iter().copied())
    }
}

impl SkillVocabulary {
    /// Builds a vocabulary from arbitrary terms. Terms are trimmed and
    /// lowercased; blank terms are dropped.
    pub fn from_terms<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = terms
            .into_iter()
            .map(|t| t.as_ref().trim().to_lowercase())
            .filter(|t| !t.is_empty())
            .collect();
        Self { terms }
    }

    /// Parses a newline-delimited list. The result fully replaces the
    /// default list; nothing is merged.
    pub fn from_lines(contents: &str) -> Self {
        Self::from_terms(contents.lines())
    }

    /// Loads an override file from disk.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read skills file '{}'", path.display()))?;
        let vocabulary = Self::from_lines(&contents);
        if vocabulary.is_empty() {
            tracing::warn!("Skills file '{}' contains no terms", path.display());
        }
        Ok(vocabulary)
    }

    /// Loads `path` if it points at an existing file, otherwise the
    /// built-in list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) if p.is_file() => Self::from_file(p),
            Some(p) => {
                tracing::warn!(
                    "Skills file '{}' not found, using built-in vocabulary",
                    p.display()
                );
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn contains(&self, term: &str) -> bool {
        self.terms.contains(term)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Every term occurring as a substring of `text_lower`, in sorted order.
    /// The caller is responsible for lowercasing.
    pub fn matches_in<'a>(&'a self, text_lower: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.iter().filter(move |term| text_lower.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_vocabulary_collapses_duplicates() {
        let vocab = SkillVocabulary::default();
        // "kafka" and "postman" each appear twice in the literal
        assert_eq!(vocab.len(), DEFAULT_SKILLS.len() - 2);
        assert!(vocab.contains("kafka"));
        assert!(vocab.contains("postman"));
    }

    #[test]
    fn test_default_vocabulary_is_lowercase() {
        let vocab = SkillVocabulary::default();
        assert!(vocab.iter().all(|t| t == t.to_lowercase()));
        assert!(vocab.len() > 200);
    }

    #[test]
    fn test_from_terms_normalizes_and_drops_blanks() {
        let vocab = SkillVocabulary::from_terms(["  Rust ", "", "   ", "RUST", "Go"]);
        let terms: Vec<&str> = vocab.iter().collect();
        assert_eq!(terms, vec!["go", "rust"]);
    }

    #[test]
    fn test_from_lines_replaces_default() {
        let vocab = SkillVocabulary::from_lines("Haskell\n\nocaml\n");
        assert_eq!(vocab.len(), 2);
        assert!(vocab.contains("haskell"));
        assert!(!vocab.contains("python"));
    }

    #[test]
    fn test_load_reads_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Zig").unwrap();
        writeln!(file, "nim").unwrap();

        let vocab = SkillVocabulary::load(Some(file.path())).unwrap();
        let terms: Vec<&str> = vocab.iter().collect();
        assert_eq!(terms, vec!["nim", "zig"]);
    }

    #[test]
    fn test_load_missing_file_falls_back_to_default() {
        let vocab = SkillVocabulary::load(Some(Path::new("/definitely/not/here.txt"))).unwrap();
        assert_eq!(vocab, SkillVocabulary::default());
    }

    #[test]
    fn test_matches_in_is_substring_based() {
        let vocab = SkillVocabulary::from_terms(["c", "java", "javascript"]);
        let hits: Vec<&str> = vocab.matches_in("vaccine research with javascript").collect();
        assert_eq!(hits, vec!["c", "java", "javascript"]);
    }
}
