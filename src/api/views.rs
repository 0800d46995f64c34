//! HTML rendering for the server-side pages.
//!
//! Every piece of dynamic text goes through `html_escape`; path segments go
//! through `urlencoding`.

use std::fmt::Write;

use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

use super::flash::Flash;
use crate::models::trend::{Platform, RegionBreakdown, TrendRecord};
use crate::services::{FormattedTrend, RegionalAnalysis};

const APP_TITLE: &str = "Trendboard";

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="pt-BR">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} | {APP_TITLE}</title>
<link rel="stylesheet" href="/static/style.css">
</head>
<body>
<header class="topbar">
  <a class="brand" href="/">{APP_TITLE}</a>
  <nav>
    <a href="/search">Buscar</a>
    <a href="/ranking">Ranking</a>
    <a href="/refresh">Atualizar</a>
  </nav>
</header>
<main>
{body}
</main>
</body>
</html>
"#,
        title = text(title),
    )
}

fn regional_link(term: &str) -> String {
    format!(
        r#"<a href="/regional/{}">{}</a>"#,
        attr(&urlencoding::encode(term)),
        text(term)
    )
}

/// Groups digits the way Brazilian readers expect: `1.234.567`.
#[must_use]
pub fn format_volume(volume: i128) -> String {
    let digits = volume.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    if volume < 0 {
        grouped.insert(0, '-');
    }
    grouped
}

fn regions_list(regions: &RegionBreakdown) -> String {
    if regions.is_empty() {
        return "<span class=\"muted\">sem dados</span>".to_string();
    }

    let mut out = String::from("<ul class=\"regions\">");
    for (region, volume) in regions.iter() {
        let _ = write!(
            out,
            "<li><span>{}</span><strong>{}</strong></li>",
            text(region),
            format_volume(volume.into())
        );
    }
    out.push_str("</ul>");
    out
}

fn flashes_block(flashes: &[Flash]) -> String {
    flashes.iter().fold(String::new(), |mut out, flash| {
        let _ = write!(
            out,
            "<div class=\"flash flash-{}\">{}</div>",
            flash.level.as_str(),
            text(&flash.message)
        );
        out
    })
}

fn search_box() -> &'static str {
    r#"<form class="search" method="post" action="/search">
  <input type="text" name="search_term" placeholder="Digite um termo ou deixe vazio para ver as tendências">
  <button type="submit">Buscar</button>
</form>"#
}

#[must_use]
pub fn index(flashes: &[Flash]) -> String {
    let body = format!(
        r#"{flashes}
<section class="hero">
  <h1>Tendências de busca no Brasil</h1>
  <p>Google, Facebook, Instagram, TikTok e YouTube em um só lugar.</p>
  {search}
  <p class="actions">
    <a class="button" href="/ranking">Ver ranking</a>
    <a class="button secondary" href="/refresh">Atualizar tendências</a>
  </p>
</section>"#,
        flashes = flashes_block(flashes),
        search = search_box(),
    );
    layout("Início", &body)
}

#[must_use]
pub fn search_form() -> String {
    let body = format!(
        r#"<section>
  <h1>Buscar tendências</h1>
  <p>Informe um termo para ver volume e regiões em cada plataforma.
  Sem termo, a busca mostra as tendências gerais do momento.</p>
  {}
</section>"#,
        search_box()
    );
    layout("Buscar", &body)
}

#[must_use]
pub fn search_results(term: &str, results: &[TrendRecord]) -> String {
    let mut rows = String::new();
    for record in results {
        let _ = write!(
            rows,
            "<tr><td>{}</td><td class=\"num\">{}</td><td>{}</td></tr>",
            record.platform,
            format_volume(record.volume.into()),
            regions_list(&record.regions)
        );
    }

    let body = format!(
        r#"<section>
  <h1>Resultados para &ldquo;{term}&rdquo;</h1>
  <p>Análise regional: {link}</p>
  <table>
    <thead><tr><th>Plataforma</th><th>Volume</th><th>Regiões</th></tr></thead>
    <tbody>{rows}</tbody>
  </table>
</section>"#,
        term = text(term),
        link = regional_link(term),
    );
    layout(&format!("Resultados: {term}"), &body)
}

#[must_use]
pub fn trending(trends: &[TrendRecord]) -> String {
    let rows = if trends.is_empty() {
        "<tr><td colspan=\"4\" class=\"muted\">Nenhuma tendência encontrada.</td></tr>".to_string()
    } else {
        trends.iter().fold(String::new(), |mut out, trend| {
            let _ = write!(
                out,
                "<tr><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td></tr>",
                regional_link(&trend.term),
                trend.platform,
                format_volume(trend.volume.into()),
                regions_list(&trend.regions)
            );
            out
        })
    };

    let body = format!(
        r#"<section>
  <h1>Tendências do momento</h1>
  <p>{count} termos coletados em todas as plataformas.</p>
  <table>
    <thead><tr><th>Termo</th><th>Plataforma</th><th>Volume</th><th>Regiões</th></tr></thead>
    <tbody>{rows}</tbody>
  </table>
</section>"#,
        count = trends.len(),
    );
    layout("Tendências", &body)
}

#[must_use]
pub fn ranking(trends: &[FormattedTrend]) -> String {
    let rows = if trends.is_empty() {
        "<tr><td colspan=\"6\" class=\"muted\">Nenhuma tendência recente. \
         <a href=\"/refresh\">Atualize</a> para coletar dados.</td></tr>"
            .to_string()
    } else {
        trends
            .iter()
            .enumerate()
            .fold(String::new(), |mut out, (i, trend)| {
                let _ = write!(
                    out,
                    "<tr><td class=\"num\">{}</td><td>{}</td><td>{}</td><td class=\"num\">{}</td><td>{}</td><td>{}</td></tr>",
                    i + 1,
                    regional_link(&trend.term),
                    text(&trend.platform),
                    format_volume(trend.search_volume.into()),
                    text(&trend.region),
                    text(&trend.date)
                );
                out
            })
    };

    let body = format!(
        r#"<section>
  <h1>Ranking</h1>
  <table>
    <thead><tr><th>#</th><th>Termo</th><th>Plataforma</th><th>Volume</th><th>Região</th><th>Data</th></tr></thead>
    <tbody>{rows}</tbody>
  </table>
</section>"#
    );
    layout("Ranking", &body)
}

#[must_use]
pub fn regional(analysis: &RegionalAnalysis) -> String {
    let platforms: Vec<Platform> = Platform::ALL
        .into_iter()
        .filter(|p| analysis.results.iter().any(|r| r.platform == *p))
        .collect();

    let header = platforms.iter().fold(String::new(), |mut out, p| {
        let _ = write!(out, "<th>{p}</th>");
        out
    });

    let mut rows = String::new();
    for row in analysis.matrix.rows() {
        let _ = write!(rows, "<tr><td>{}</td>", text(&row.region));
        for platform in &platforms {
            match row.volume(*platform) {
                Some(volume) => {
                    let _ = write!(rows, "<td class=\"num\">{}</td>", format_volume(volume.into()));
                }
                None => rows.push_str("<td class=\"muted num\">-</td>"),
            }
        }
        rows.push_str("</tr>");
    }

    let summary = analysis.results.iter().fold(String::new(), |mut out, r| {
        let _ = write!(
            out,
            "<li><span>{}</span><strong>{}</strong></li>",
            r.platform,
            format_volume(r.volume.into())
        );
        out
    });

    let body = format!(
        r#"<section>
  <h1>Análise regional: {term}</h1>
  <h2>Volume por plataforma</h2>
  <ul class="regions">{summary}</ul>
  <h2>Por região</h2>
  <table>
    <thead><tr><th>Região</th>{header}</tr></thead>
    <tbody>{rows}</tbody>
  </table>
</section>"#,
        term = text(&analysis.term),
    );
    layout(&format!("Análise regional: {}", analysis.term), &body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::TrendsAggregator;

    fn record(platform: Platform, volume: u64, regions: &[(&str, u64)]) -> TrendRecord {
        TrendRecord {
            term: "ofertas".to_string(),
            platform,
            volume,
            regions: regions.iter().map(|(r, v)| ((*r).to_string(), *v)).collect(),
        }
    }

    #[test]
    fn test_format_volume() {
        assert_eq!(format_volume(0), "0");
        assert_eq!(format_volume(999), "999");
        assert_eq!(format_volume(1000), "1.000");
        assert_eq!(format_volume(1_234_567), "1.234.567");
        assert_eq!(format_volume(-4200), "-4.200");
    }

    #[test]
    fn test_terms_are_escaped() {
        let html = search_results("<script>alert(1)</script>", &[]);
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_regional_links_are_url_encoded() {
        let html = trending(&[TrendRecord {
            term: "Black Friday".to_string(),
            ..record(Platform::Facebook, 10, &[])
        }]);
        assert!(html.contains("/regional/Black%20Friday"));
    }

    #[test]
    fn test_index_renders_flashes() {
        let html = index(&[Flash::success("Tendências atualizadas! 3 termos coletados.")]);
        assert!(html.contains("flash-success"));
        assert!(html.contains("3 termos coletados"));
    }

    #[test]
    fn test_ranking_rows() {
        let trends = vec![FormattedTrend {
            term: "ofertas".to_string(),
            platform: "Google".to_string(),
            search_volume: 42,
            region: "Brasil".to_string(),
            date: "2024-11-29".to_string(),
        }];
        let html = ranking(&trends);
        assert!(html.contains("<td>Brasil</td>"));
        assert!(html.contains("2024-11-29"));
    }

    #[test]
    fn test_regional_marks_missing_platforms() {
        let results = vec![
            record(Platform::Google, 60, &[("Bahia", 70)]),
            record(Platform::Facebook, 9000, &[("São Paulo", 20000)]),
        ];
        let analysis = RegionalAnalysis {
            term: "ofertas".to_string(),
            matrix: TrendsAggregator::regional_matrix(&results),
            results,
        };

        let html = regional(&analysis);
        assert!(html.contains("<th>Google</th><th>Facebook</th>"));
        assert!(html.contains("<td>Bahia</td><td class=\"num\">70</td><td class=\"muted num\">-</td>"));
        assert!(html.contains("20.000"));
    }
}
