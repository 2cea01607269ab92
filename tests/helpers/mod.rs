//! Shared fixtures for the integration tests
//!
//! Scenarios pair an input sentence with the references it should yield,
//! written in the explicit `Display` form ("Genesis 1:1-50:26").

#![allow(dead_code)]

use std::sync::Once;

use scripture_refs::ReferenceService;

static TRACING: Once = Once::new();

/// Install a test-writer subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn service() -> ReferenceService {
    init_tracing();
    ReferenceService::standard()
}

/// One sentence and what recognition should produce from it
#[derive(Debug, Clone)]
pub struct Scenario {
    pub text: &'static str,
    pub expected: Vec<&'static str>,
    pub rejected: usize,
    pub category: &'static str,
}

impl Scenario {
    pub fn found(text: &'static str, expected: &[&'static str]) -> Self {
        Self {
            text,
            expected: expected.to_vec(),
            rejected: 0,
            category: "general",
        }
    }

    pub fn none(text: &'static str) -> Self {
        Self::found(text, &[])
    }

    pub fn with_rejected(mut self, count: usize) -> Self {
        self.rejected = count;
        self
    }

    pub fn with_category(mut self, category: &'static str) -> Self {
        self.category = category;
        self
    }
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        // Book only
        Scenario::found(
            "Genesis has 50 chapters, but Exodus has 40.",
            &["Genesis 1:1-50:26", "Exodus 1:1-40:38"],
        )
        .with_category("book"),
        Scenario::found("Song of Solomon is poetry", &["Song of Songs 1:1-8:14"])
            .with_category("book"),
        // Single book spans
        Scenario::found("Read Genesis 1 tonight", &["Genesis 1:1-31"]).with_category("chapter"),
        Scenario::found(
            "The ten commandments can be found in Exodus 20.",
            &["Exodus 20:1-26"],
        )
        .with_category("chapter"),
        Scenario::found("Genesis 1:1", &["Genesis 1:1"]).with_category("verse"),
        Scenario::found("Genesis 1:1-3", &["Genesis 1:1-3"]).with_category("verse"),
        Scenario::found("Genesis 1:1-2:3", &["Genesis 1:1-2:3"]).with_category("verse"),
        Scenario::found("Isaiah 40\u{2013}42", &["Isaiah 40:1-42:25"]).with_category("chapter"),
        // Cross-book ranges
        Scenario::found("Matthew 1:1 - John 21:25", &["Matthew 1:1 - John 21:25"])
            .with_category("cross_book"),
        Scenario::found("Matthew - John", &["Matthew 1:1 - John 21:25"])
            .with_category("cross_book"),
        Scenario::found(
            "The books of the law are Genesis - Deuteronomy",
            &["Genesis 1:1 - Deuteronomy 34:12"],
        )
        .with_category("cross_book"),
        Scenario::found("Ruth 4 - 1 Samuel 2", &["Ruth 4:1 - 1 Samuel 2:36"])
            .with_category("cross_book"),
        Scenario::found("Genesis 1 - Jude 3", &["Genesis 1:1 - Jude 1:3"])
            .with_category("cross_book"),
        Scenario::found("3 John 5 - Jude", &["3 John 1:5 - Jude 1:25"])
            .with_category("cross_book"),
        // Lists
        Scenario::found(
            "You should read Matthew 1:18 - 2:18, Luke 3: 5-7, Psalm 130:4,8 and Jeremiah 29:32-30:10,11",
            &[
                "Matthew 1:18-2:18",
                "Luke 3:5-7",
                "Psalms 130:4",
                "Psalms 130:8",
                "Jeremiah 29:32-30:10",
                "Jeremiah 30:11",
            ],
        )
        .with_category("list"),
        Scenario::found(
            "you should read matthew 1:18 - 2:18, luke 3: 5-7, psalm 130:4,8 and jeremiah 29:32-30:10,12",
            &[
                "Matthew 1:18-2:18",
                "Luke 3:5-7",
                "Psalms 130:4",
                "Psalms 130:8",
                "Jeremiah 29:32-30:10",
                "Jeremiah 30:12",
            ],
        )
        .with_category("list"),
        Scenario::found("Genesis 1, 3", &["Genesis 1:1-31", "Genesis 3:1-24"])
            .with_category("list"),
        // Abbreviations and ordinals
        Scenario::found("Jo 1:1", &["John 1:1"]).with_category("alias"),
        Scenario::found(
            "Joshua 1:1, Job 1:1 and Jonah 1:1",
            &["Joshua 1:1", "Job 1:1", "Jonah 1:1"],
        )
        .with_category("alias"),
        Scenario::found("Jud 1:1 and Judges 1:1", &["Jude 1:1", "Judges 1:1"])
            .with_category("alias"),
        Scenario::found("Jn 3:16 and Jnh 1:17", &["John 3:16", "Jonah 1:17"])
            .with_category("alias"),
        Scenario::found("I Cor. 13:4-7", &["1 Corinthians 13:4-7"]).with_category("alias"),
        Scenario::found("First John 4:8", &["1 John 4:8"]).with_category("alias"),
        Scenario::found("Philemon 1:9", &["Philemon 1:9"]).with_category("alias"),
        Scenario::found("Jude 3", &["Jude 1:3"]).with_category("alias"),
        // Spanish, Portuguese and KJV titles
        Scenario::found("Juan 3:16 y Salmos 23", &["John 3:16", "Psalms 23:1-6"])
            .with_category("translation"),
        Scenario::found("João 1:1 e Gên 1:1", &["John 1:1", "Genesis 1:1"])
            .with_category("translation"),
        Scenario::found("Primero Reyes 3:5", &["1 Kings 3:5"]).with_category("translation"),
        Scenario::found("Santiago 1:5", &["James 1:5"]).with_category("translation"),
        Scenario::none("Santiago is a city").with_category("translation"),
        Scenario::found(
            "First Book of the Kings, Commonly Called the Third Book of the Kings 3:5",
            &["1 Kings 3:5"],
        )
        .with_category("translation"),
        Scenario::found("Ecclesiastes or, the Preacher 3:1", &["Ecclesiastes 3:1"])
            .with_category("translation"),
        Scenario::found(
            "The General Epistle of James and the Epistle of Paul the Apostle to the Romans",
            &["James 1:1-5:20", "Romans 1:1-16:27"],
        )
        .with_category("translation"),
        // Not references
        Scenario::none("the numbers is 3 and acts of kindness").with_category("prose"),
        Scenario::none("Gen on its own").with_category("prose"),
        Scenario::none("Genesis 1: In the beginning").with_category("prose"),
        Scenario::none("Tobit 1:1").with_category("prose"),
        // Recognized but invalid
        Scenario::found("Psalm 151", &[])
            .with_rejected(1)
            .with_category("invalid"),
        Scenario::found("Genesis 50:27 or Genesis 50:26", &["Genesis 50:26"])
            .with_rejected(1)
            .with_category("invalid"),
        Scenario::found("Psalm 1000", &[])
            .with_rejected(1)
            .with_category("invalid"),
        Scenario::found("Genesis 1:1000", &[])
            .with_rejected(1)
            .with_category("invalid"),
    ]
}
