#[cfg(test)]
mod tests {
    use crate::diff_file::FileStatus;
    use crate::{DiffFile, LineType, ParserConfig, Revision, parse_diff};

    fn parse(diff: &str) -> Vec<DiffFile> {
        parse_diff(diff, &ParserConfig::default())
    }

    /// Every block numbers its lines consecutively from its start lines.
    fn assert_numbering(file: &DiffFile) {
        for block in &file.blocks {
            let mut old_line = block.old_start_line;
            let mut new_line = block.new_start_line;
            for line in &block.lines {
                match line.line_type {
                    LineType::Insert => {
                        assert_eq!(line.old_number, None);
                        assert_eq!(line.new_number, Some(new_line));
                        new_line += 1;
                    }
                    LineType::Delete => {
                        assert_eq!(line.old_number, Some(old_line));
                        assert_eq!(line.new_number, None);
                        old_line += 1;
                    }
                    _ => {
                        assert_eq!(line.old_number, Some(old_line));
                        assert_eq!(line.new_number, Some(new_line));
                        old_line += 1;
                        new_line += 1;
                    }
                }
            }
        }
    }

    const SAMPLE: &str = "diff --git a/sample b/sample\nindex 0000001..0ddf2ba\n--- a/sample\n+++ b/sample\n@@ -1 +1 @@\n-test\n+test1r\n";

    #[test]
    fn test_parse_simple_git_diff() {
        let files = parse(SAMPLE);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert_eq!(file.old_name, "sample");
        assert_eq!(file.new_name, "sample");
        assert_eq!(file.language, "");
        assert!(file.is_git_diff);
        assert!(!file.is_combined);
        assert_eq!(file.added_lines, 1);
        assert_eq!(file.deleted_lines, 1);
        assert_eq!(file.checksum_before, Some(Revision::Single("0000001".into())));
        assert_eq!(file.checksum_after.as_deref(), Some("0ddf2ba"));
        assert_eq!(file.status(), FileStatus::Changed);

        assert_eq!(file.blocks.len(), 1);
        let block = &file.blocks[0];
        assert_eq!(block.header, "@@ -1 +1 @@");
        assert_eq!(block.old_start_line, 1);
        assert_eq!(block.new_start_line, 1);
        assert_eq!(block.old_start_line2, None);

        assert_eq!(block.lines.len(), 2);
        assert_eq!(block.lines[0].content, "-test");
        assert_eq!(block.lines[0].line_type, LineType::Delete);
        assert_eq!(block.lines[0].old_number, Some(1));
        assert_eq!(block.lines[0].new_number, None);
        assert_eq!(block.lines[1].content, "+test1r");
        assert_eq!(block.lines[1].line_type, LineType::Insert);
        assert_eq!(block.lines[1].old_number, None);
        assert_eq!(block.lines[1].new_number, Some(1));
    }

    #[test]
    fn test_line_endings_do_not_change_the_result() {
        let unix = parse(SAMPLE);
        let windows = parse(&SAMPLE.replace('\n', "\r\n"));
        let classic_mac = parse(&SAMPLE.replace('\n', "\r"));

        assert_eq!(unix, windows);
        assert_eq!(unix, classic_mac);
    }

    #[test]
    fn test_parse_real_git_diff() {
        let diff = "diff --git a/src/main.rs b/src/main.rs
index 1234567..abcdefg 100644
--- a/src/main.rs
+++ b/src/main.rs
@@ -1,5 +1,6 @@
-This is the original file.
+This is the MODIFIED file.
 It has multiple lines.
-Some content here.
+Some NEW content here.
 More content.
+Additional line added.
 Final line.
@@ -20,3 +21,2 @@ fn main() {
 first
-second
 third
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert_eq!(file.language, "rs");
        assert_eq!(file.mode.as_deref(), Some("100644"));
        assert_eq!(file.added_lines, 3);
        assert_eq!(file.deleted_lines, 3);
        assert_eq!(file.blocks.len(), 2);
        assert_eq!(file.blocks[1].header, "@@ -20,3 +21,2 @@ fn main() {");
        assert_eq!(file.blocks[1].old_start_line, 20);
        assert_eq!(file.blocks[1].new_start_line, 21);
        assert_eq!(file.line_count(), 11);
        assert_numbering(file);

        let last = file.blocks[1].lines.last().unwrap();
        assert_eq!(last.old_number, Some(22));
        assert_eq!(last.new_number, Some(22));
    }

    #[test]
    fn test_parse_multiple_unified_files_with_timestamps() {
        let diff = "--- a/one.txt\t2016-10-25 11:37:14.000000000 +0200
+++ b/one.txt\t2016-10-25 11:37:14.000000000 +0200
@@ -1 +1 @@
-a
+b
--- a/two.txt\t2016-10-25 11:37:14.000000000 +0200
+++ b/two.txt\t2016-10-25 11:37:14.000000000 +0200
@@ -5,2 +5,3 @@
 x
+y
 z
";
        let files = parse(diff);

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].old_name, "one.txt");
        assert_eq!(files[0].new_name, "one.txt");
        assert_eq!(files[0].language, "txt");
        assert!(!files[0].is_git_diff);
        assert_eq!(files[0].blocks[0].lines.len(), 2);

        assert_eq!(files[1].new_name, "two.txt");
        assert_eq!(files[1].added_lines, 1);
        assert_eq!(files[1].deleted_lines, 0);
        let lines = &files[1].blocks[0].lines;
        assert_eq!(lines[1].new_number, Some(6));
        assert_eq!(lines[2].old_number, Some(6));
        assert_eq!(lines[2].new_number, Some(7));
        files.iter().for_each(assert_numbering);
    }

    #[test]
    fn test_parse_rename_without_hunks() {
        let diff = "diff --git a/src/old.rs b/src/new.rs
similarity index 98%
rename from src/old.rs
rename to src/new.rs
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert!(file.is_rename);
        assert_eq!(file.unchanged_percentage, Some(98));
        assert_eq!(file.old_name, "src/old.rs");
        assert_eq!(file.new_name, "src/new.rs");
        assert!(file.blocks.is_empty());
        assert_eq!(file.status(), FileStatus::Renamed);
        assert_eq!(file.display_name(), "src/{old.rs → new.rs}");
    }

    #[test]
    fn test_explicit_headers_win_over_rename_lines() {
        let diff = "diff --git a/old.txt b/new.txt
similarity index 90%
rename from renamed-from.txt
rename to renamed-to.txt
index 1111111..2222222 100644
--- a/old.txt
+++ b/new.txt
@@ -1,2 +1,2 @@
 keep
-before
+after
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert!(file.is_rename);
        assert_eq!(file.old_name, "old.txt");
        assert_eq!(file.new_name, "new.txt");
        assert_eq!(file.blocks[0].lines.len(), 3);
        assert_numbering(file);
    }

    #[test]
    fn test_parse_copy() {
        let diff = "diff --git a/a.rs b/b.rs
similarity index 100%
copy from a.rs
copy to b.rs
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        assert!(files[0].is_copy);
        assert_eq!(files[0].old_name, "a.rs");
        assert_eq!(files[0].new_name, "b.rs");
        assert_eq!(files[0].status(), FileStatus::Copied);
    }

    #[test]
    fn test_parse_combined_diff() {
        let diff = "diff --combined describe.c
index fabadb8,cc95eb0..4866510
--- a/describe.c
+++ b/describe.c
@@@ -98,20 -98,12 +98,20 @@@
   return (a_date > b_date) ? -1 : (a_date == b_date) ? 0 : 1;
  }
- static void describe(char *arg)
 -static void describe(struct commit *cmit, int last_one)
++static void describe(char *arg, int last_one)
  {
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert!(file.is_git_diff);
        assert!(file.is_combined);
        assert_eq!(file.new_name, "describe.c");
        assert_eq!(file.language, "c");
        assert_eq!(
            file.checksum_before,
            Some(Revision::Combined(vec!["fabadb8".into(), "cc95eb0".into()]))
        );
        assert_eq!(file.checksum_after.as_deref(), Some("4866510"));
        assert_eq!(file.added_lines, 1);
        assert_eq!(file.deleted_lines, 2);

        let block = &file.blocks[0];
        assert_eq!(block.old_start_line, 98);
        assert_eq!(block.old_start_line2, Some(98));
        assert_eq!(block.new_start_line, 98);
        let types: Vec<LineType> = block.lines.iter().map(|line| line.line_type).collect();
        assert_eq!(
            types,
            vec![
                LineType::Context,
                LineType::Context,
                LineType::Delete,
                LineType::Delete,
                LineType::Insert,
                LineType::Context,
            ]
        );
        assert_numbering(file);
    }

    #[test]
    fn test_parse_combined_cc_header() {
        let diff = "diff --cc merged.txt
index 1111111,2222222..3333333
mode 100644,100644..100755
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert!(file.is_combined);
        assert_eq!(file.old_name, "merged.txt");
        assert_eq!(
            file.old_mode,
            Some(Revision::Combined(vec!["100644".into(), "100644".into()]))
        );
        assert_eq!(file.new_mode.as_deref(), Some("100755"));
    }

    #[test]
    fn test_parse_git_binary_diff() {
        let diff = "diff --git a/image.png b/image.png
index 1111111..2222222 100644
Binary files a/image.png and b/image.png differ
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert!(file.is_binary);
        assert_eq!(file.old_name, "image.png");
        assert_eq!(file.new_name, "image.png");
        assert_eq!(file.blocks.len(), 1);
        assert_eq!(file.blocks[0].header, "Binary files differ");
        assert!(file.blocks[0].lines.is_empty());
    }

    #[test]
    fn test_parse_plain_binary_diff() {
        let files = parse("Binary files a/data.bin and b/data.bin differ\n");

        assert_eq!(files.len(), 1);
        assert!(files[0].is_binary);
        assert!(!files[0].is_git_diff);
        assert_eq!(files[0].new_name, "data.bin");
        assert_eq!(files[0].blocks[0].header, "Binary files differ");
    }

    #[test]
    fn test_parse_git_binary_patch() {
        let diff = "diff --git a/blob b/blob
new file mode 100644
index 0000000..1111111
GIT binary patch
literal 4
LcmZ?wbY%bo00Ie-

literal 0
HcmV?d00001
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        let file = &files[0];
        assert!(file.is_new);
        assert!(file.is_binary);
        assert_eq!(file.new_file_mode.as_deref(), Some("100644"));
        assert_eq!(file.new_name, "blob");
        assert_eq!(file.blocks.len(), 1);
        assert_eq!(file.blocks[0].header, "GIT binary patch");
        assert!(file.blocks[0].lines.is_empty());
        assert_eq!(file.status(), FileStatus::Added);
    }

    #[test]
    fn test_parse_deleted_file() {
        let diff = "diff --git a/gone.txt b/gone.txt
deleted file mode 100644
index 1234567..0000000
--- a/gone.txt
+++ /dev/null
@@ -1,2 +0,0 @@
-one
-two
";
        let files = parse(diff);

        let file = &files[0];
        assert!(file.is_deleted);
        assert_eq!(file.deleted_file_mode, Some(Revision::Single("100644".into())));
        assert_eq!(file.old_name, "gone.txt");
        assert_eq!(file.new_name, "/dev/null");
        assert_eq!(file.deleted_lines, 2);
        assert_eq!(file.status(), FileStatus::Deleted);
        assert_eq!(file.display_name(), "gone.txt");
        assert_numbering(file);
    }

    #[test]
    fn test_parse_mode_change_only() {
        let diff = "diff --git a/run.sh b/run.sh
old mode 100644
new mode 100755
";
        let files = parse(diff);

        assert_eq!(files.len(), 1);
        assert_eq!(files[0].old_mode, Some(Revision::Single("100644".into())));
        assert_eq!(files[0].new_mode.as_deref(), Some("100755"));
        assert_eq!(files[0].new_name, "run.sh");
        assert!(files[0].blocks.is_empty());
    }

    #[test]
    fn test_malformed_hunk_header_numbers_from_zero() {
        let files = parse("--- a/x\n+++ b/x\n@@ @@\n a\n b\n");

        let block = &files[0].blocks[0];
        assert_eq!(block.header, "@@ @@");
        assert_eq!(block.old_start_line, 0);
        assert_eq!(block.new_start_line, 0);
        assert_eq!(block.lines[0].old_number, Some(0));
        assert_eq!(block.lines[1].new_number, Some(1));
    }

    #[test]
    fn test_no_newline_marker_is_dropped() {
        let diff = "--- a/x\n+++ b/x\n@@ -1 +1 @@\n-a\n\\ No newline at end of file\n+b\n\\ No newline at end of file\n";
        let files = parse(diff);

        let lines = &files[0].blocks[0].lines;
        assert_eq!(lines.len(), 2);
        assert!(lines.iter().all(|line| line.line_type != LineType::Info));
    }

    #[test]
    fn test_input_without_files() {
        assert!(parse("").is_empty());
        assert!(parse("just some text\nwithout a diff\n").is_empty());
    }

    #[test]
    fn test_quoted_file_names() {
        let diff = "--- \"a/with space.txt\"\n+++ \"b/with space.txt\"\n@@ -1 +1 @@\n-a\n+b\n";
        let files = parse(diff);

        assert_eq!(files[0].old_name, "with space.txt");
        assert_eq!(files[0].new_name, "with space.txt");
    }

    #[test]
    fn test_custom_prefixes() {
        let diff = "--- left/x.txt\n+++ right/x.txt\n@@ -1 +1 @@\n-a\n+b\n";

        let files = parse(diff);
        assert_eq!(files[0].old_name, "left/x.txt");
        assert_eq!(files[0].new_name, "right/x.txt");

        let config = ParserConfig {
            src_prefix: Some("left/".into()),
            dst_prefix: Some("right/".into()),
            ..ParserConfig::default()
        };
        let files = parse_diff(diff, &config);
        assert_eq!(files[0].old_name, "x.txt");
        assert_eq!(files[0].new_name, "x.txt");
    }

    #[test]
    fn test_too_many_changes_truncates_file() {
        let diff = "diff --git a/big b/big
--- a/big
+++ b/big
@@ -1,2 +1,2 @@
-a
-b
+c
+d
diff --git a/small b/small
--- a/small
+++ b/small
@@ -1 +1 @@
-x
+y
";
        let config = ParserConfig {
            diff_max_changes: Some(1),
            ..ParserConfig::default()
        };
        let files = parse_diff(diff, &config);

        assert_eq!(files.len(), 2);
        let big = &files[0];
        assert!(big.is_too_big);
        assert_eq!(big.added_lines, 0);
        assert_eq!(big.deleted_lines, 0);
        assert_eq!(big.blocks.len(), 1);
        assert_eq!(big.blocks[0].header, "Diff too big to be displayed");
        assert!(big.blocks[0].lines.is_empty());

        let small = &files[1];
        assert!(!small.is_too_big);
        assert_eq!(small.blocks[0].lines.len(), 2);
    }

    #[test]
    fn test_long_line_truncates_file_with_custom_message() {
        let diff = "--- a/x\n+++ b/x\n@@ -1 +1 @@\n-short\n+this line is far too long\n";
        let config = ParserConfig {
            diff_max_line_length: Some(12),
            diff_too_big_message: Some("Skipped".into()),
            ..ParserConfig::default()
        };
        let files = parse_diff(diff, &config);

        assert!(files[0].is_too_big);
        assert_eq!(files[0].blocks.len(), 1);
        assert_eq!(files[0].blocks[0].header, "Skipped");
        assert_eq!(files[0].deleted_lines, 0);
    }

    #[test]
    fn test_mixed_line_endings() {
        let mixed = parse("--- a/x\r\n+++ b/x\r@@ -1 +1 @@\n-a\r\n+b\r");
        let unix = parse("--- a/x\n+++ b/x\n@@ -1 +1 @@\n-a\n+b\n");

        assert_eq!(mixed, unix);
        assert_eq!(mixed[0].blocks[0].lines.len(), 2);
    }

    #[test]
    fn test_line_counters_match_classified_lines() {
        let diff = "diff --git a/one.rs b/one.rs
--- a/one.rs
+++ b/one.rs
@@ -1,4 +1,4 @@
-a
-b
+c
 d
+e
@@ -10,2 +10,1 @@
-f
 g
diff --git a/two.rs b/two.rs
new file mode 100644
--- /dev/null
+++ b/two.rs
@@ -0,0 +1,3 @@
+x
+y
+z
";
        let files = parse(diff);
        assert_eq!(files.len(), 2);

        let count = |line_type: LineType| {
            files
                .iter()
                .flat_map(|file| &file.blocks)
                .flat_map(|block| &block.lines)
                .filter(|line| line.line_type == line_type)
                .count()
        };
        let added: usize = files.iter().map(|file| file.added_lines).sum();
        let deleted: usize = files.iter().map(|file| file.deleted_lines).sum();

        assert_eq!(added, 5);
        assert_eq!(deleted, 3);
        assert_eq!(added, count(LineType::Insert));
        assert_eq!(deleted, count(LineType::Delete));
    }

    #[test]
    fn test_hunk_header_at_the_numbering_limit() {
        let files = parse("--- a/x\n+++ b/x\n@@ -4294967295 +4294967295 @@\n a\n b\n+c\n");

        let lines = &files[0].blocks[0].lines;
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].old_number, Some(u32::MAX));
        assert_eq!(lines[1].old_number, Some(u32::MAX));
        assert_eq!(lines[2].new_number, Some(u32::MAX));
        assert_eq!(files[0].added_lines, 1);
    }

    #[test]
    fn test_hunk_header_beyond_the_numbering_limit() {
        let files = parse("--- a/x\n+++ b/x\n@@ -99999999999 +1 @@\n a\n");

        let block = &files[0].blocks[0];
        assert_eq!(block.old_start_line, 0);
        assert_eq!(block.new_start_line, 0);
        assert_eq!(block.lines[0].old_number, Some(0));
    }
}
