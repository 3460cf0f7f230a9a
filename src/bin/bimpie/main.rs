mod error;

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::PathBuf;
use std::process::ExitCode;

use argh::FromArgs;
use bimpie::{Operation, Unstoppable};
use error::CliError;

#[derive(FromArgs, Debug)]
#[argh(help_triggers("-h", "--help"))]
/// Perform image processing operations on a BMP image.
/// By default, the modified image is written back to `bmpfile`.
struct Args {
    /// flip the image horizontally
    #[argh(switch)]
    fliph: bool,

    /// flip the image vertically
    #[argh(switch)]
    flipv: bool,

    /// rotate the image 90 degrees right (clockwise) n mod 4 times
    #[argh(option)]
    rotr: Vec<i32>,

    /// write the modified image to this file in .bmp format
    #[argh(option, short = 'o')]
    output: Vec<PathBuf>,

    /// the 24-bit BMP image to edit
    #[argh(positional)]
    bmpfile: PathBuf,
}

/// Operations in the order their options appear on the command line.
///
/// argh validates the options but keeps no ordering, so the raw arguments
/// are scanned again. Valued options are collected as lists so that a
/// repeat reaches this scan instead of failing inside argh.
fn operation_queue(args: &Args, raw: &[String]) -> Result<Vec<Operation>, CliError> {
    let mut ops = Vec::with_capacity(3);
    let mut output_seen = false;
    let mut tokens = raw.iter();
    while let Some(token) = tokens.next() {
        let op = match token.as_str() {
            "--" => break,
            "-o" | "--output" => {
                if std::mem::replace(&mut output_seen, true) {
                    return Err(CliError::DuplicateOption(token.clone()));
                }
                tokens.next();
                continue;
            }
            "--fliph" => Operation::FlipHorizontal,
            "--flipv" => Operation::FlipVertical,
            "--rotr" => {
                tokens.next();
                Operation::RotateRight(args.rotr.first().copied().unwrap_or(0))
            }
            _ => continue,
        };
        let seen = ops
            .iter()
            .any(|o| core::mem::discriminant(o) == core::mem::discriminant(&op));
        if seen {
            return Err(CliError::DuplicateOption(token.clone()));
        }
        ops.push(op);
    }
    Ok(ops)
}

fn run(args: &Args, ops: &[Operation]) -> Result<(), CliError> {
    let input = &args.bmpfile;
    let file = File::open(input).map_err(|source| CliError::Open {
        path: input.clone(),
        source,
    })?;
    let mut image = bimpie::read_bmp(BufReader::new(file), Unstoppable)
        .map_err(|e| CliError::codec(input.clone(), e))?;

    image.apply_all(ops.iter().copied());

    let output = args.output.first().unwrap_or(input);
    let file = File::create(output).map_err(|source| CliError::Open {
        path: output.clone(),
        source,
    })?;
    bimpie::write_bmp(&image, BufWriter::new(file), Unstoppable)
        .map_err(|e| CliError::codec(output.clone(), e))
}

fn main() -> ExitCode {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args: Args = argh::from_env();

    let result = operation_queue(&args, &raw).and_then(|ops| run(&args, &ops));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("bimpie: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    fn parse(argv: &[&str]) -> (Args, Vec<String>) {
        let args = Args::from_args(&["bimpie"], argv).unwrap();
        (args, argv.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn queue_follows_command_line_order() {
        let (args, raw) = parse(&[
            "--rotr", "5", "img.bmp", "--fliph", "-o", "out.bmp", "--flipv",
        ]);
        assert_eq!(
            operation_queue(&args, &raw).unwrap(),
            vec![
                Operation::RotateRight(5),
                Operation::FlipHorizontal,
                Operation::FlipVertical,
            ]
        );
        assert_eq!(args.output, vec![PathBuf::from("out.bmp")]);
    }

    #[test]
    fn negative_rotation_is_accepted() {
        let (args, raw) = parse(&["img.bmp", "--rotr", "-1"]);
        assert_eq!(
            operation_queue(&args, &raw).unwrap(),
            vec![Operation::RotateRight(-1)]
        );
    }

    #[test]
    fn duplicate_flip_is_rejected() {
        let (args, raw) = parse(&["--fliph", "img.bmp", "--fliph"]);
        let err = operation_queue(&args, &raw).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "duplicate option --fliph");
    }

    #[test]
    fn repeated_rotation_is_rejected() {
        let (args, raw) = parse(&["--rotr", "1", "img.bmp", "--rotr", "2"]);
        let err = operation_queue(&args, &raw).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "duplicate option --rotr");
    }

    #[test]
    fn repeated_output_is_rejected_under_either_name() {
        let (args, raw) = parse(&["-o", "a.bmp", "img.bmp", "--output", "b.bmp"]);
        let err = operation_queue(&args, &raw).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.to_string(), "duplicate option --output");
    }

    #[test]
    fn short_and_long_help() {
        for flag in ["-h", "--help"] {
            let exit = Args::from_args(&["bimpie"], &[flag]).unwrap_err();
            assert_eq!(exit.status, Ok(()));
            assert!(exit.output.contains("--fliph"), "{flag}");
            assert!(exit.output.contains("--rotr"), "{flag}");
        }
    }

    #[test]
    fn missing_input_file_is_open_error() {
        let (args, _) = parse(&["/nonexistent/dir/img.bmp"]);
        let err = run(&args, &[]).unwrap_err();
        assert_eq!(err.exit_code(), 9);
        assert_eq!(err.to_string(), "could not open /nonexistent/dir/img.bmp");
    }

    fn sample_bmp() -> Vec<u8> {
        let mut pixels = bimpie::PixelBuffer::allocate(3, 2).unwrap();
        pixels.set(0, 0, bimpie::Bgr8 { b: 1, g: 2, r: 3 });
        pixels.set(1, 2, bimpie::Bgr8 { b: 4, g: 5, r: 6 });
        bimpie::encode(&bimpie::BmpImage::new(pixels), Unstoppable).unwrap()
    }

    fn run_on(contents: &[u8], argv: &[&str]) -> (Result<(), CliError>, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("img.bmp");
        std::fs::write(&input, contents).unwrap();

        let input = input.to_str().unwrap().to_string();
        let mut full: Vec<&str> = argv.to_vec();
        full.push(input.as_str());
        let (args, raw) = parse(&full);
        let result = operation_queue(&args, &raw).and_then(|ops| run(&args, &ops));
        (result, dir)
    }

    #[test]
    fn non_bmp_input_exits_7() {
        let (result, dir) = run_on(b"P6\n2 2\n255\n", &["--fliph"]);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 7);
        let path = dir.path().join("img.bmp");
        assert_eq!(err.to_string(), format!("{} is not a BMP file", path.display()));
    }

    #[test]
    fn corrupted_input_exits_8() {
        let mut data = sample_bmp();
        data.pop();
        let len = data.len() as u32;
        data[2..6].copy_from_slice(&len.to_le_bytes());

        let (result, dir) = run_on(&data, &[]);
        let err = result.unwrap_err();
        assert_eq!(err.exit_code(), 8);
        let path = dir.path().join("img.bmp");
        assert_eq!(err.to_string(), format!("{} is corrupted", path.display()));
    }

    #[test]
    fn io_failures_map_to_read_and_write_codes() {
        let path = PathBuf::from("img.bmp");
        let read = CliError::codec(path.clone(), bimpie::BmpError::Read(io::Error::other("eio")));
        assert_eq!(read.exit_code(), 10);
        assert_eq!(read.to_string(), "reading from img.bmp failed");

        let eof = CliError::codec(path.clone(), bimpie::BmpError::UnexpectedEof);
        assert_eq!(eof.exit_code(), 10);

        let write = CliError::codec(path, bimpie::BmpError::Write(io::Error::other("enospc")));
        assert_eq!(write.exit_code(), 11);
        assert_eq!(write.to_string(), "writing to img.bmp failed");
    }

    #[test]
    fn operations_are_written_to_output() {
        let data = sample_bmp();
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.bmp");
        let output = dir.path().join("out.bmp");
        std::fs::write(&input, &data).unwrap();

        let (args, raw) = parse(&[
            "--fliph",
            "-o",
            output.to_str().unwrap(),
            input.to_str().unwrap(),
        ]);
        let ops = operation_queue(&args, &raw).unwrap();
        run(&args, &ops).unwrap();

        // input untouched, output flipped
        assert_eq!(std::fs::read(&input).unwrap(), data);
        let mut expected = bimpie::decode(&data, Unstoppable).unwrap();
        expected.flip_horizontal();
        let written = bimpie::decode(&std::fs::read(&output).unwrap(), Unstoppable).unwrap();
        assert_eq!(written, expected);
    }
}
