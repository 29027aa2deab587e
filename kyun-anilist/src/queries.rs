//! GraphQL documents sent to AniList.

pub const SEARCH_MEDIA: &str = r#"
query ($search: String, $type: MediaType, $perPage: Int) {
  Page(page: 1, perPage: $perPage) {
    media(search: $search, sort: SEARCH_MATCH, type: $type) {
      id
      title { english romaji native }
      siteUrl
      genres
      coverImage { medium }
      episodes
      chapters
      status
      format
      averageScore
    }
  }
}
"#;

pub const USER_BY_NAME: &str = r#"
query ($name: String) {
  User(name: $name) {
    id
  }
}
"#;

pub const MEDIA_LIST: &str = r#"
query ($userId: Int!, $type: MediaType, $status: MediaListStatus) {
  MediaListCollection(userId: $userId, type: $type, status: $status, sort: UPDATED_TIME_DESC) {
    lists {
      name
      isCustomList
      entries {
        progress
        media {
          title { english romaji native }
          siteUrl
          episodes
          chapters
        }
      }
    }
  }
}
"#;

pub const FAVOURITE_ANIME: &str = r#"
query ($userId: Int, $page: Int, $perPage: Int) {
  User(id: $userId) {
    favourites {
      anime(page: $page, perPage: $perPage) {
        pageInfo { hasNextPage }
        nodes {
          title { english romaji native }
          siteUrl
          episodes
        }
      }
    }
  }
}
"#;

pub const FAVOURITE_MANGA: &str = r#"
query ($userId: Int, $page: Int, $perPage: Int) {
  User(id: $userId) {
    favourites {
      manga(page: $page, perPage: $perPage) {
        pageInfo { hasNextPage }
        nodes {
          title { english romaji native }
          siteUrl
          chapters
        }
      }
    }
  }
}
"#;
