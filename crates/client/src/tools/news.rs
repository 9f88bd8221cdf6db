//! Latest news for an app

use serde::Deserialize;
use steamtools_core::constants::{DEFAULT_NEWS_COUNT, DEFAULT_NEWS_MAX_LENGTH};
use steamtools_core::{News, NewsItem, ResultRecord, ToolError, ToolMessage, ToolParameters};

use super::{ToolContext, APP_ID_EMPTY};
use crate::steam_api::{expect_key, fetch, StatusPolicy, API_NEWS};
use crate::transport::UpstreamRequest;

#[derive(Debug, Deserialize)]
struct NewsEnvelope {
    appnews: Option<AppNews>,
}

#[derive(Debug, Deserialize)]
struct AppNews {
    appid: Option<u64>,
    newsitems: Option<Vec<SteamNewsItem>>,
}

#[derive(Debug, Deserialize)]
struct SteamNewsItem {
    gid: Option<String>,
    title: Option<String>,
    url: Option<String>,
    author: Option<String>,
    contents: Option<String>,
    date: Option<i64>,
    feedlabel: Option<String>,
    feed_name: Option<String>,
}

pub(super) fn news(ctx: &ToolContext<'_>, params: &ToolParameters) -> Result<ToolMessage, ToolError> {
    ctx.api_key()?;
    let appid = params.required("appid", APP_ID_EMPTY)?;
    let count = params.number_or(
        "count",
        DEFAULT_NEWS_COUNT,
        "Invalid count value. It must be a non-negative integer.",
    )?;
    let maxlength = params.number_or(
        "maxlength",
        DEFAULT_NEWS_MAX_LENGTH,
        "Invalid maxlength value. It must be a non-negative integer.",
    )?;
    let wrap = |e| ToolError::upstream("get game news", e);

    let request = UpstreamRequest::get(ctx.endpoints.api_url(API_NEWS))
        .param("appid", &appid)
        .param("count", count)
        .param("maxlength", maxlength)
        .param("format", "json");
    let envelope: NewsEnvelope = fetch(ctx.transport, &request, StatusPolicy::Generic).map_err(wrap)?;
    let appnews = expect_key(envelope.appnews).map_err(wrap)?;
    let items = expect_key(appnews.newsitems).map_err(wrap)?;

    if items.is_empty() {
        return Ok(ToolMessage::text(format!("No news found for game ID {}", appid)));
    }

    let record = News {
        appid: appnews.appid,
        news_count: items.len(),
        newsitems: items
            .into_iter()
            .map(|item| NewsItem {
                gid: item.gid,
                title: item.title,
                url: item.url,
                author: item.author,
                contents: item.contents,
                date: item.date,
                feedlabel: item.feedlabel,
                feed_name: item.feed_name,
            })
            .collect(),
    };

    Ok(ToolMessage::json(&ResultRecord::ok(record))?)
}
