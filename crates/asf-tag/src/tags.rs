//! Tag identities and the ASF tag catalog.
//!
//! Two layers of tag description exist. Generic [`Tag`] identities name
//! metadata independently of any container format; the catalog maps each
//! of them to an [`AsfTagInfo`] descriptor carrying the on-disk attribute
//! name, the ASF data type, editability, and the header child object that
//! owns the attribute. Descriptors with [`ObjectKind::Unknown`] have no
//! owning object in this format and therefore never resolve to a value.

/// Data type of a generic tag value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagDataType {
    /// Text.
    String,
    /// 32-bit signed integer.
    Int32,
    /// 64-bit signed integer.
    Int64,
    /// Elapsed time.
    Duration,
    /// Absolute timestamp.
    DateTime,
    /// Picture data.
    Picture,
}

/// Data type of an ASF tag value.
///
/// Discriminants follow the Windows Media `WMT_ATTR_DATATYPE` order,
/// which differs from the storage-type codes used on disk by the
/// Extended Content Description object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AsfTagDataType {
    /// Unsigned 32-bit integer.
    UInt32 = 0,
    /// UTF-16LE string.
    String = 1,
    /// Byte array.
    Binary = 2,
    /// Boolean (32 bits on disk).
    Bool = 3,
    /// Unsigned 64-bit integer.
    UInt64 = 4,
    /// Unsigned 16-bit integer.
    UInt16 = 5,
    /// 128-bit identifier.
    Guid = 6,
}

/// The header child object owning a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    /// No owning object; the tag is not resolvable in this format.
    Unknown,
    /// Content Description object.
    ContentDescription,
    /// Extended Content Description object.
    ExtendedContentDescription,
    /// File Properties object.
    FileProperties,
}

/// An ASF tag descriptor.
#[derive(Debug, PartialEq, Eq)]
pub struct AsfTagInfo {
    /// On-disk attribute name.
    pub name: &'static str,
    /// Declared ASF data type.
    pub data_type: AsfTagDataType,
    /// Whether the tag accepts writes.
    pub editable: bool,
    /// The child object that stores the tag.
    pub owner: ObjectKind,
}

const fn tag(
    name: &'static str,
    data_type: AsfTagDataType,
    editable: bool,
    owner: ObjectKind,
) -> AsfTagInfo {
    AsfTagInfo {
        name,
        data_type,
        editable,
        owner,
    }
}

// Content Description slots, in wire order.
pub static TITLE: AsfTagInfo = tag(
    "Title",
    AsfTagDataType::String,
    true,
    ObjectKind::ContentDescription,
);
pub static AUTHOR: AsfTagInfo = tag(
    "Author",
    AsfTagDataType::String,
    true,
    ObjectKind::ContentDescription,
);
pub static COPYRIGHT: AsfTagInfo = tag(
    "Copyright",
    AsfTagDataType::String,
    true,
    ObjectKind::ContentDescription,
);
pub static DESCRIPTION: AsfTagInfo = tag(
    "Description",
    AsfTagDataType::String,
    true,
    ObjectKind::ContentDescription,
);
pub static RATING: AsfTagInfo = tag(
    "Rating",
    AsfTagDataType::String,
    true,
    ObjectKind::ContentDescription,
);

// File Properties tags. Read-only through the generic surface; FileSize is
// kept in sync by the root object through a dedicated setter.
pub static DURATION: AsfTagInfo = tag(
    "Duration",
    AsfTagDataType::UInt64,
    false,
    ObjectKind::FileProperties,
);
pub static FILE_SIZE: AsfTagInfo = tag(
    "FileSize",
    AsfTagDataType::UInt64,
    false,
    ObjectKind::FileProperties,
);

// Extended Content Description attributes.
pub static ALBUM_ARTIST: AsfTagInfo = tag(
    "WM/AlbumArtist",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ALBUM_TITLE: AsfTagInfo = tag(
    "WM/AlbumTitle",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static AUDIO_FILE_URL: AsfTagInfo = tag(
    "WM/AudioFileURL",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static AUDIO_SOURCE_URL: AsfTagInfo = tag(
    "WM/AudioSourceURL",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static AUTHOR_URL: AsfTagInfo = tag(
    "WM/AuthorURL",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static BEATS_PER_MINUTE: AsfTagInfo = tag(
    "WM/BeatsPerMinute",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static COMPOSER: AsfTagInfo = tag(
    "WM/Composer",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static CONDUCTOR: AsfTagInfo = tag(
    "WM/Conductor",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static CONTENT_GROUP_DESCRIPTION: AsfTagInfo = tag(
    "WM/ContentGroupDescription",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ENCODED_BY: AsfTagInfo = tag(
    "WM/EncodedBy",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ENCODING_SETTINGS: AsfTagInfo = tag(
    "WM/EncodingSettings",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ENCODING_TIME: AsfTagInfo = tag(
    "WM/EncodingTime",
    AsfTagDataType::UInt64,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static GENRE: AsfTagInfo = tag(
    "WM/Genre",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static INITIAL_KEY: AsfTagInfo = tag(
    "WM/InitialKey",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ISRC: AsfTagInfo = tag(
    "WM/ISRC",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static LANGUAGE: AsfTagInfo = tag(
    "WM/Language",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static MCDI: AsfTagInfo = tag(
    "WM/MCDI",
    AsfTagDataType::Binary,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static MODIFIED_BY: AsfTagInfo = tag(
    "WM/ModifiedBy",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static MOOD: AsfTagInfo = tag(
    "WM/Mood",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ORIGINAL_ALBUM_TITLE: AsfTagInfo = tag(
    "WM/OriginalAlbumTitle",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ORIGINAL_ARTIST: AsfTagInfo = tag(
    "WM/OriginalArtist",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ORIGINAL_FILENAME: AsfTagInfo = tag(
    "WM/OriginalFilename",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ORIGINAL_LYRICIST: AsfTagInfo = tag(
    "WM/OriginalLyricist",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static ORIGINAL_RELEASE_YEAR: AsfTagInfo = tag(
    "WM/OriginalReleaseYear",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static PARENTAL_RATING: AsfTagInfo = tag(
    "WM/ParentalRating",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static PART_OF_SET: AsfTagInfo = tag(
    "WM/PartOfSet",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static PLAYLIST_DELAY: AsfTagInfo = tag(
    "WM/PlaylistDelay",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static PUBLISHER: AsfTagInfo = tag(
    "WM/Publisher",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static RADIO_STATION_NAME: AsfTagInfo = tag(
    "WM/RadioStationName",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static RADIO_STATION_OWNER: AsfTagInfo = tag(
    "WM/RadioStationOwner",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static SHARED_USER_RATING: AsfTagInfo = tag(
    "WM/SharedUserRating",
    AsfTagDataType::UInt32,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static SUB_TITLE: AsfTagInfo = tag(
    "WM/SubTitle",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static TRACK: AsfTagInfo = tag(
    "WM/Track",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static TRACK_NUMBER: AsfTagInfo = tag(
    "WM/TrackNumber",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static WRITER: AsfTagInfo = tag(
    "WM/Writer",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);
pub static YEAR: AsfTagInfo = tag(
    "WM/Year",
    AsfTagDataType::String,
    true,
    ObjectKind::ExtendedContentDescription,
);

// Descriptors with no owning object in this format. They exist so that
// by-name lookups recognize the attributes, but they never resolve to a
// value through the container.
pub static BITRATE: AsfTagInfo = tag("Bitrate", AsfTagDataType::UInt32, false, ObjectKind::Unknown);
pub static BROADCAST: AsfTagInfo =
    tag("Broadcast", AsfTagDataType::Bool, false, ObjectKind::Unknown);
pub static COPYRIGHT_URL: AsfTagInfo = tag(
    "CopyrightURL",
    AsfTagDataType::String,
    false,
    ObjectKind::Unknown,
);
pub static IS_VBR: AsfTagInfo = tag("IsVBR", AsfTagDataType::Bool, false, ObjectKind::Unknown);
pub static PICTURE: AsfTagInfo = tag(
    "WM/Picture",
    AsfTagDataType::Binary,
    false,
    ObjectKind::Unknown,
);
pub static SEEKABLE: AsfTagInfo =
    tag("Seekable", AsfTagDataType::Bool, false, ObjectKind::Unknown);
pub static TEXT: AsfTagInfo = tag("WM/Text", AsfTagDataType::Binary, false, ObjectKind::Unknown);
pub static USER_WEB_URL: AsfTagInfo = tag(
    "WM/UserWebURL",
    AsfTagDataType::Binary,
    false,
    ObjectKind::Unknown,
);
pub static WM_CONTENT_ID: AsfTagInfo = tag(
    "WM/WMContentID",
    AsfTagDataType::Guid,
    false,
    ObjectKind::Unknown,
);

/// Every descriptor in the catalog, for by-name lookup.
static CATALOG: &[&AsfTagInfo] = &[
    &TITLE,
    &AUTHOR,
    &COPYRIGHT,
    &DESCRIPTION,
    &RATING,
    &DURATION,
    &FILE_SIZE,
    &ALBUM_ARTIST,
    &ALBUM_TITLE,
    &AUDIO_FILE_URL,
    &AUDIO_SOURCE_URL,
    &AUTHOR_URL,
    &BEATS_PER_MINUTE,
    &COMPOSER,
    &CONDUCTOR,
    &CONTENT_GROUP_DESCRIPTION,
    &ENCODED_BY,
    &ENCODING_SETTINGS,
    &ENCODING_TIME,
    &GENRE,
    &INITIAL_KEY,
    &ISRC,
    &LANGUAGE,
    &MCDI,
    &MODIFIED_BY,
    &MOOD,
    &ORIGINAL_ALBUM_TITLE,
    &ORIGINAL_ARTIST,
    &ORIGINAL_FILENAME,
    &ORIGINAL_LYRICIST,
    &ORIGINAL_RELEASE_YEAR,
    &PARENTAL_RATING,
    &PART_OF_SET,
    &PLAYLIST_DELAY,
    &PUBLISHER,
    &RADIO_STATION_NAME,
    &RADIO_STATION_OWNER,
    &SHARED_USER_RATING,
    &SUB_TITLE,
    &TRACK,
    &TRACK_NUMBER,
    &WRITER,
    &YEAR,
    &BITRATE,
    &BROADCAST,
    &COPYRIGHT_URL,
    &IS_VBR,
    &PICTURE,
    &SEEKABLE,
    &TEXT,
    &USER_WEB_URL,
    &WM_CONTENT_ID,
];

/// A generic, format-independent tag identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    AlbumArtist,
    AlbumTitle,
    Artist,
    ArtistUrl,
    AudioSourceUrl,
    BeatsPerMinute,
    Comment,
    Composer,
    Conductor,
    ContentGroupDescription,
    Copyright,
    CopyrightUrl,
    Duration,
    EncodedBy,
    EncodingSettings,
    EncodingTime,
    FileSize,
    Genre,
    InitialKey,
    Isrc,
    Language,
    Lyricist,
    Mcdi,
    ModifiedBy,
    Mood,
    OriginalAlbumTitle,
    OriginalArtist,
    OriginalFileName,
    OriginalLyricist,
    OriginalReleaseDate,
    PartOfSet,
    Picture,
    PlaylistDelay,
    Publisher,
    RadioStationName,
    RadioStationOwner,
    ReleaseDate,
    SubTitle,
    Text,
    Title,
    TrackNumber,
    Url,
    UserWebUrl,
}

impl Tag {
    /// Every generic tag identity, in display order.
    pub const ALL: &'static [Tag] = &[
        Tag::Title,
        Tag::Artist,
        Tag::AlbumTitle,
        Tag::AlbumArtist,
        Tag::TrackNumber,
        Tag::ReleaseDate,
        Tag::Genre,
        Tag::Comment,
        Tag::Composer,
        Tag::Conductor,
        Tag::Copyright,
        Tag::CopyrightUrl,
        Tag::ContentGroupDescription,
        Tag::Duration,
        Tag::FileSize,
        Tag::BeatsPerMinute,
        Tag::EncodedBy,
        Tag::EncodingSettings,
        Tag::EncodingTime,
        Tag::InitialKey,
        Tag::Isrc,
        Tag::Language,
        Tag::Lyricist,
        Tag::Mcdi,
        Tag::ModifiedBy,
        Tag::Mood,
        Tag::OriginalAlbumTitle,
        Tag::OriginalArtist,
        Tag::OriginalFileName,
        Tag::OriginalLyricist,
        Tag::OriginalReleaseDate,
        Tag::PartOfSet,
        Tag::Picture,
        Tag::PlaylistDelay,
        Tag::Publisher,
        Tag::RadioStationName,
        Tag::RadioStationOwner,
        Tag::SubTitle,
        Tag::Text,
        Tag::ArtistUrl,
        Tag::AudioSourceUrl,
        Tag::Url,
        Tag::UserWebUrl,
    ];

    /// Stable name of the identity, as used by the CLI.
    pub fn name(self) -> &'static str {
        match self {
            Tag::AlbumArtist => "album-artist",
            Tag::AlbumTitle => "album",
            Tag::Artist => "artist",
            Tag::ArtistUrl => "artist-url",
            Tag::AudioSourceUrl => "audio-source-url",
            Tag::BeatsPerMinute => "bpm",
            Tag::Comment => "comment",
            Tag::Composer => "composer",
            Tag::Conductor => "conductor",
            Tag::ContentGroupDescription => "grouping",
            Tag::Copyright => "copyright",
            Tag::CopyrightUrl => "copyright-url",
            Tag::Duration => "duration",
            Tag::EncodedBy => "encoded-by",
            Tag::EncodingSettings => "encoding-settings",
            Tag::EncodingTime => "encoding-time",
            Tag::FileSize => "file-size",
            Tag::Genre => "genre",
            Tag::InitialKey => "initial-key",
            Tag::Isrc => "isrc",
            Tag::Language => "language",
            Tag::Lyricist => "lyricist",
            Tag::Mcdi => "mcdi",
            Tag::ModifiedBy => "modified-by",
            Tag::Mood => "mood",
            Tag::OriginalAlbumTitle => "original-album",
            Tag::OriginalArtist => "original-artist",
            Tag::OriginalFileName => "original-filename",
            Tag::OriginalLyricist => "original-lyricist",
            Tag::OriginalReleaseDate => "original-release-date",
            Tag::PartOfSet => "part-of-set",
            Tag::Picture => "picture",
            Tag::PlaylistDelay => "playlist-delay",
            Tag::Publisher => "publisher",
            Tag::RadioStationName => "radio-station-name",
            Tag::RadioStationOwner => "radio-station-owner",
            Tag::ReleaseDate => "release-date",
            Tag::SubTitle => "subtitle",
            Tag::Text => "text",
            Tag::Title => "title",
            Tag::TrackNumber => "track",
            Tag::Url => "url",
            Tag::UserWebUrl => "user-web-url",
        }
    }

    /// Look up an identity by its stable name.
    pub fn from_name(name: &str) -> Option<Tag> {
        Tag::ALL.iter().copied().find(|tag| tag.name() == name)
    }

    /// Data type of the generic value.
    pub fn data_type(self) -> TagDataType {
        match self {
            Tag::BeatsPerMinute | Tag::TrackNumber => TagDataType::Int32,
            Tag::FileSize => TagDataType::Int64,
            Tag::Duration => TagDataType::Duration,
            Tag::EncodingTime | Tag::OriginalReleaseDate | Tag::ReleaseDate => {
                TagDataType::DateTime
            }
            Tag::Picture => TagDataType::Picture,
            _ => TagDataType::String,
        }
    }
}

/// Map a generic tag identity to this format's descriptor.
pub fn asf_tag(tag: Tag) -> Option<&'static AsfTagInfo> {
    let info = match tag {
        Tag::AlbumArtist => &ALBUM_ARTIST,
        Tag::AlbumTitle => &ALBUM_TITLE,
        Tag::Artist => &AUTHOR,
        Tag::ArtistUrl => &AUTHOR_URL,
        Tag::AudioSourceUrl => &AUDIO_SOURCE_URL,
        Tag::BeatsPerMinute => &BEATS_PER_MINUTE,
        Tag::Comment => &DESCRIPTION,
        Tag::Composer => &COMPOSER,
        Tag::Conductor => &CONDUCTOR,
        Tag::ContentGroupDescription => &CONTENT_GROUP_DESCRIPTION,
        Tag::Copyright => &COPYRIGHT,
        Tag::CopyrightUrl => &COPYRIGHT_URL,
        Tag::Duration => &DURATION,
        Tag::EncodedBy => &ENCODED_BY,
        Tag::EncodingSettings => &ENCODING_SETTINGS,
        Tag::EncodingTime => &ENCODING_TIME,
        Tag::FileSize => &FILE_SIZE,
        Tag::Genre => &GENRE,
        Tag::InitialKey => &INITIAL_KEY,
        Tag::Isrc => &ISRC,
        Tag::Language => &LANGUAGE,
        Tag::Lyricist => &WRITER,
        Tag::Mcdi => &MCDI,
        Tag::ModifiedBy => &MODIFIED_BY,
        Tag::Mood => &MOOD,
        Tag::OriginalAlbumTitle => &ORIGINAL_ALBUM_TITLE,
        Tag::OriginalArtist => &ORIGINAL_ARTIST,
        Tag::OriginalFileName => &ORIGINAL_FILENAME,
        Tag::OriginalLyricist => &ORIGINAL_LYRICIST,
        Tag::OriginalReleaseDate => &ORIGINAL_RELEASE_YEAR,
        Tag::PartOfSet => &PART_OF_SET,
        Tag::Picture => &PICTURE,
        Tag::PlaylistDelay => &PLAYLIST_DELAY,
        Tag::Publisher => &PUBLISHER,
        Tag::RadioStationName => &RADIO_STATION_NAME,
        Tag::RadioStationOwner => &RADIO_STATION_OWNER,
        Tag::ReleaseDate => &YEAR,
        Tag::SubTitle => &SUB_TITLE,
        Tag::Text => &TEXT,
        Tag::Title => &TITLE,
        Tag::TrackNumber => &TRACK_NUMBER,
        Tag::Url => &AUDIO_FILE_URL,
        Tag::UserWebUrl => &USER_WEB_URL,
    };
    Some(info)
}

/// Look up a descriptor by its on-disk attribute name.
pub fn asf_tag_by_name(name: &str) -> Option<&'static AsfTagInfo> {
    CATALOG.iter().copied().find(|info| info.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_identities_resolve() {
        assert_eq!(asf_tag(Tag::Artist), Some(&AUTHOR));
        assert_eq!(asf_tag(Tag::Comment), Some(&DESCRIPTION));
        assert_eq!(asf_tag(Tag::ReleaseDate), Some(&YEAR));
        assert_eq!(asf_tag(Tag::Lyricist), Some(&WRITER));
    }

    #[test]
    fn by_name_lookup_matches_catalog() {
        assert_eq!(asf_tag_by_name("WM/AlbumTitle"), Some(&ALBUM_TITLE));
        assert_eq!(asf_tag_by_name("Title"), Some(&TITLE));
        assert_eq!(asf_tag_by_name("NoSuchTag"), None);
    }

    #[test]
    fn cli_names_round_trip() {
        for tag in Tag::ALL {
            assert_eq!(Tag::from_name(tag.name()), Some(*tag));
        }
    }

    #[test]
    fn file_properties_tags_are_not_editable() {
        assert!(!DURATION.editable);
        assert!(!FILE_SIZE.editable);
        assert_eq!(FILE_SIZE.owner, ObjectKind::FileProperties);
    }
}
