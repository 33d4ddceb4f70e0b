//! Pipeline constants.
//!
//! Centralizes magic numbers, sentinels and fixed vocabularies.

/// Metadata API constants.
pub mod api {
    /// Genius API root.
    pub const BASE_URL: &str = "https://api.genius.com";

    /// Songs requested per catalog page.
    pub const PAGE_SIZE: u32 = 50;

    /// Seconds to wait after every API call.
    pub const COOLDOWN_SECS: u64 = 2;

    /// Default per-request timeout in seconds.
    pub const TIMEOUT_SECS: u64 = 30;
}

/// Catalog collection constants.
pub mod catalog {
    /// Rows buffered before an append to the catalog CSV.
    pub const FLUSH_BATCH: usize = 10;

    /// Release date used when no date representation is available.
    pub const NO_DATE: &str = "NO DATE";

    /// Case-insensitive phrases that disqualify a song when found in its
    /// title, artist or features.
    pub const EXCLUDED_PHRASES: &[&str] = &[
        "Traduction",
        "ChopNotSlop Remix",
        "(Instrumental)",
        "Chopped & Screwed",
        "(Skit)",
        "(Acapella)",
        "a capella",
        "Interview",
        "[Script]",
        "(Interlude)",
        "Originally Performed By",
        "Genius Russian Translations",
        "Traducciones",
        "Traductions Françaises",
        "Genius Traductions Françaises",
        "Genius Türkçe Çeviri",
        "Traduções",
        "Fresh Finds",
        "(Commentary)",
        "Genius 中文翻譯",
        "Genius Srpski Prevodi",
        "Genius Swedish Translations",
        "Genius Farsi Translations",
        "Polskie tłumaczenia",
        "Genius Deutsche Übersetzungen",
        "Genius English Translations",
        "Outside the Lines With Rap Genius",
        "[Album Art]",
    ];
}

/// Lyrics page fetching constants.
pub mod fetch {
    /// Seconds to pause between fetch strides.
    pub const COOLDOWN_SECS: u64 = 2;

    /// Pause once every this many songs.
    pub const COOLDOWN_STRIDE: usize = 10;

    /// Browser identity presented to the lyrics site.
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:77.0) Gecko/20100101 Firefox/77.0";

    /// Meta tag whose content ends with the site-internal song id.
    pub const SONG_ID_SELECTOR: &str = r#"meta[property="twitter:app:url:iphone"]"#;

    /// Element holding the lyric text.
    pub const LYRICS_SELECTOR: &str = r#"div[data-lyrics-container="true"]"#;
}

/// Lyrics file format constants.
pub mod lyrics_file {
    /// Marker line between the metadata header and the lyrics body.
    pub const SEPARATOR: &str = "======";

    /// Header labels, in file order.
    pub const SONG_TITLE: &str = "SONG TITLE";
    /// Release date label.
    pub const RELEASE_DATE: &str = "RELEASE DATE";
    /// Primary artist label.
    pub const PRIMARY_ARTIST: &str = "PRIMARY ARTIST";
    /// Featured artists label.
    pub const FEATURED_ARTISTS: &str = "FEATURED ARTISTS";
    /// Site-internal id label.
    pub const SONG_ID: &str = "SONG ID";
}

/// Verse parsing constants.
pub mod verses {
    /// Verse body marking a song without transcribed lyrics.
    pub const NO_LYRICS: &str = "NO LYRICS";

    /// Classifier input used when a verse has no bracketed header.
    pub const NO_HEADER: &str = "NO HEADER";

    /// Artist candidates with this prefix are production credits.
    pub const PRODUCED_BY: &str = "produced by";
}

/// Filesystem layout constants.
pub mod paths {
    /// Default root for per-artist output directories.
    pub const DEFAULT_BASE_PATH: &str = "./lyrics";

    /// Suffix of the per-artist catalog CSV.
    pub const CATALOG_SUFFIX: &str = "_data.csv";

    /// Suffix of the per-artist verses CSV.
    pub const VERSES_SUFFIX: &str = "_verses.csv";
}
