// Writes swatches.html showing the default token colors and, when an
// image is given on the command line, its dominant colors and the
// primary scale derived from them.

use std::{env,
          io::{BufWriter, Write},
          fs::File,
          error::Error,
          path::Path};
use rgb::RGB8;
use design_tokens::{extract_image_colors, parse_hex, ColorScale,
                    QuantizeOptions, RGBColor, TokenDocument, TokenMap};

type Err = Box<dyn Error>;

fn table_of_colors(fh: &mut impl Write, colors: &[RGB8],
                   width: u32, comment: &str) -> Result<(), Err> {
    writeln!(fh, "<table style=\"border: 0px;  border-spacing: 0px\"><tr>")?;
    for c in colors {
        writeln!(fh, "  <td title=\"{0}\" style=\"width: {width}px; \
                      height: 30px; background-color: {0}\"></td>",
                 c.to_hex())?;
    }
    writeln!(fh, "<td rowspan=\"2\" style=\"padding-left: 7px\">\
                  {comment}</td></tr><tr>")?;
    for c in colors {
        writeln!(fh, "  <td style=\"width: {width}px; height: 12px; \
                      background-color: {}\"></td>",
                 c.to_gray().to_hex())?;
    }
    writeln!(fh, "</tr></table><br/>")?;
    Ok(())
}

fn scale(fh: &mut impl Write, s: &ColorScale, comment: &str)
         -> Result<(), Err> {
    let colors: Vec<_> = s.iter().filter_map(|(_, h)| parse_hex(h)).collect();
    table_of_colors(fh, &colors, 43, comment)
}

fn map(fh: &mut impl Write, m: &TokenMap, comment: &str) -> Result<(), Err> {
    let colors: Vec<_> = m.values().filter_map(|h| parse_hex(h)).collect();
    table_of_colors(fh, &colors, 43, comment)
}

fn main() -> Result<(), Err> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();
    let mut fh = BufWriter::new(File::create("swatches.html")?);
    writeln!(fh, "<html>\n\
                  <head>\n\
                  <title>Design tokens: swatches</title>\n\
                  </head>\n\
                  <body>")?;

    writeln!(fh, "<h3>Default colors</h3>")?;
    let doc = TokenDocument::default();
    scale(&mut fh, &doc.colors.primary, "primary")?;
    map(&mut fh, &doc.colors.semantic, "semantic")?;
    map(&mut fh, &doc.colors.neutral, "neutral")?;

    if let Some(path) = env::args().nth(1) {
        let opts = QuantizeOptions::default();
        let report = extract_image_colors(Path::new(&path), &opts)?;
        writeln!(fh, "<h3>{path}</h3>")?;
        let colors: Vec<_> = report.all_colors.iter()
            .map(|c| c.to_rgb8()).collect();
        table_of_colors(&mut fh, &colors, 43, "clusters, most frequent first")?;
        let accents: Vec<_> = report.categorized.accents.iter()
            .map(|c| c.to_rgb8()).collect();
        table_of_colors(&mut fh, &accents, 43, "accents")?;
        if let Some(s) = &report.color_scales {
            scale(&mut fh, &s.primary, "primary scale")?;
        }
    }

    writeln!(fh, "</body>\n\
                  </html>")?;
    Ok(())
}
