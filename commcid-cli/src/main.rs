mod output;

use commcid::cid::Cid;
use commcid::*;
use common::logging::{parse_level, LogConfig};
use common::prelude::*;
use multibase::Base;
use output::Report;
use structopt::StructOpt;

fn parse_base(s: &str) -> Result<Base, Error> {
    Ok(match s {
        "base16" | "hex" => Base::Base16Lower,
        "base16upper" => Base::Base16Upper,
        "base32" => Base::Base32Lower,
        "base32upper" => Base::Base32Upper,
        "base36" => Base::Base36Lower,
        "base58btc" => Base::Base58Btc,
        "base64" => Base::Base64,
        "base64url" => Base::Base64Url,
        _ => return Err(anyhow!("unsupported multibase `{}`", s)),
    })
}

fn parse_switch(s: &str) -> Result<bool, Error> {
    match s.to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Ok(true),
        "false" | "0" | "no" | "off" => Ok(false),
        _ => Err(anyhow!("expected `true` or `false`, got `{}`", s)),
    }
}

fn parse_commitment(s: &str) -> Result<Vec<u8>, Error> {
    hex::decode(s.trim_start_matches("0x"))
        .with_context(|| format!("commitment `{}` is not valid hex", s))
}

#[derive(StructOpt)]
#[structopt(name = "commcid", about = "Converts Filecoin commitments to and from CIDs")]
struct Config {
    #[structopt(
        long,
        env = "COMMCID_BASE",
        default_value = "base32",
        parse(try_from_str = parse_base),
        help = "Multibase used to print CIDs. One of: `base16`, `base16upper`, `base32`, \
                `base32upper`, `base36`, `base58btc`, `base64`, `base64url`"
    )]
    base: Base,

    #[structopt(
        long,
        env = "COMMCID_LOG_LEVEL",
        default_value = "info",
        parse(try_from_str = parse_level),
        help = "Lowest level of the log records written to stderr"
    )]
    log_level: slog::Level,

    #[structopt(
        long,
        env = "COMMCID_JSON",
        default_value = "false",
        parse(try_from_str = parse_switch),
        help = "Print results as a JSON object (`true` or `false`)"
    )]
    json: bool,

    #[structopt(subcommand)]
    command: Command,
}

impl LogConfig for Config {
    fn log_level(&self) -> slog::Level {
        self.log_level
    }
}

#[derive(StructOpt)]
enum Command {
    /// Wraps a hex encoded commitment in a v1 CID
    Encode {
        #[structopt(long, short, default_value = "data", help = "One of: data, piece, replica")]
        kind: CommitmentKind,
        commitment: String,
    },

    /// Extracts the hex encoded commitment from a v1 CID
    Decode {
        #[structopt(long, short, default_value = "data", help = "One of: data, piece, replica")]
        kind: CommitmentKind,
        cid: RawCid,
    },

    /// Decodes a CID of either Filecoin commitment codec
    Inspect { cid: RawCid },

    /// Builds a piece multihash CID from a piece commitment and its unpadded size
    PieceEncode { commitment: String, size: u64 },

    /// Extracts the piece commitment and unpadded size from a piece multihash CID
    PieceDecode { cid: RawCid },

    /// Converts a v1 piece commitment CID to a piece multihash CID
    ToPieceCid { cid: RawCid, size: u64 },

    /// Converts a piece multihash CID to a v1 piece commitment CID
    ToV1Cid { cid: RawCid },

    /// Height of the merkle tree over `size` bytes
    TreeHeight {
        size: u64,
        #[structopt(long, help = "`size` is already fr32 padded")]
        fr32_padded: bool,
    },

    /// Height and trailing padding of the merkle tree over `size` unpadded bytes
    TreePadding { size: u64 },
}

fn main() -> Result<()> {
    common::main(run)
}

fn run(logger: Logger, config: Config) -> Result<()> {
    let report = execute(&logger, config.base, config.command)?;
    println!("{}", report.render(config.json)?);
    Ok(())
}

fn format_cid(cid: &Cid, base: Base) -> Result<String> {
    Ok(RawCid::from(cid).to_string_of_base(base)?)
}

fn execute(logger: &Logger, base: Base, command: Command) -> Result<Report> {
    Ok(match command {
        Command::Encode { kind, commitment } => {
            let commitment = parse_commitment(&commitment)?;
            let cid = kind
                .to_cid(&commitment)
                .with_context(|| format!("encoding {} commitment", kind))?;
            info!(logger, "Encoded commitment"; "kind" => kind, "cid" => cid.to_string());

            Report {
                cid: Some(format_cid(&cid, base)?),
                ..Default::default()
            }
        }

        Command::Decode { kind, cid } => {
            let commitment = kind
                .from_cid(&cid)
                .with_context(|| format!("decoding {} commitment from {}", kind, cid))?;
            info!(logger, "Decoded commitment"; "kind" => kind, "cid" => cid.to_string());

            Report {
                commitment: Some(hex::encode(commitment)),
                ..Default::default()
            }
        }

        Command::Inspect { cid } => {
            let decoded = cid_to_commitment(&cid)
                .with_context(|| format!("decoding commitment from {}", cid))?;
            debug!(logger, "Inspected commitment";
                "cid" => cid.to_string(),
                "codec" => decoded.codec,
                "hash" => decoded.hash,
            );

            Report {
                commitment: Some(hex::encode(&decoded.digest)),
                codec: Some(format!("0x{:x}", decoded.codec)),
                hash: Some(format!("0x{:x}", decoded.hash)),
                ..Default::default()
            }
        }

        Command::PieceEncode { commitment, size } => {
            let commitment = parse_commitment(&commitment)?;
            let cid = data_commitment_v1_to_piece_mh_cid(&commitment, size)
                .context("encoding piece multihash cid")?;
            info!(logger, "Encoded piece"; "cid" => cid.to_string(), "size" => size);

            Report {
                cid: Some(format_cid(&cid, base)?),
                ..Default::default()
            }
        }

        Command::PieceDecode { cid } => {
            let (commitment, size) = piece_mh_cid_to_data_commitment_v1(&cid)
                .with_context(|| format!("decoding piece multihash cid {}", cid))?;
            info!(logger, "Decoded piece"; "commitment" => commitment, "size" => size);

            Report {
                commitment: Some(commitment.to_string()),
                unpadded_size: Some(size),
                ..Default::default()
            }
        }

        Command::ToPieceCid { cid, size } => {
            let piece = convert_v1_cid_to_piece_mh_cid(&cid, size)
                .with_context(|| format!("converting {} to a piece multihash cid", cid))?;
            info!(logger, "Converted to piece multihash cid";
                "from" => cid.to_string(),
                "to" => piece.to_string(),
                "size" => size,
            );

            Report {
                cid: Some(format_cid(&piece, base)?),
                ..Default::default()
            }
        }

        Command::ToV1Cid { cid } => {
            let (v1, size) = convert_piece_mh_cid_to_v1_cid(&cid)
                .with_context(|| format!("converting {} to a v1 cid", cid))?;
            info!(logger, "Converted to v1 cid";
                "from" => cid.to_string(),
                "to" => v1.to_string(),
                "size" => size,
            );

            Report {
                cid: Some(format_cid(&v1, base)?),
                unpadded_size: Some(size),
                ..Default::default()
            }
        }

        Command::TreeHeight { size, fr32_padded } => {
            let height = match fr32_padded {
                true => fr32_padded_size_to_v1_tree_height(size),
                false => unpadded_size_to_v1_tree_height(size),
            };
            debug!(logger, "Tree height"; "size" => size, "fr32_padded" => fr32_padded, "height" => height);

            Report {
                height: Some(height),
                ..Default::default()
            }
        }

        Command::TreePadding { size } => {
            let TreeSizeInfo { height, padding } =
                unpadded_size_to_v1_tree_height_and_padding(size)?;
            debug!(logger, "Tree padding"; "size" => size, "height" => height, "padding" => padding);

            Report {
                height: Some(height),
                padding: Some(padding),
                ..Default::default()
            }
        }
    })
}
