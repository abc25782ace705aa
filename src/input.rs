//! Line-oriented pose records.
//!
//! Each non-empty line holds either a bare pose (`x y conf` for all 17 keypoints) or a
//! detection (`x1 y1 x2 y2 score` followed by the pose). Values may be separated by
//! whitespace or commas and `#` starts a comment.

use crate::{
    error::Error,
    point::finite,
    pose::{Detection, Pose, NUM_KEYPOINTS, VALUES_PER_KEYPOINT},
};
use std::io::BufRead;

pub const POSE_VALUES: usize = NUM_KEYPOINTS * VALUES_PER_KEYPOINT;
pub const DETECTION_VALUES: usize = 5 + POSE_VALUES;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Record {
    Pose(Pose),
    Detection(Detection),
}

impl Record {
    pub fn pose(&self) -> &Pose {
        match self {
            Self::Pose(pose) => pose,
            Self::Detection(detection) => &detection.pose,
        }
    }
}

/// Parse one line. Blank and comment-only lines yield `None`.
pub fn parse_record(line: &str) -> Result<Option<Record>, Error> {
    let content = line.split('#').next().unwrap_or_default();
    let values = content
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|token| !token.is_empty())
        .map(|token| {
            token
                .parse::<f32>()
                .map_err(|e| Error::ParseValue(e, token.to_owned()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    match values.len() {
        0 => Ok(None),
        POSE_VALUES => Ok(Some(Record::Pose(Pose::from_flat(&values)?))),
        DETECTION_VALUES => {
            let (head, keypoints) = values.split_at(5);
            Ok(Some(Record::Detection(Detection {
                bbox: [
                    finite(head[0])?,
                    finite(head[1])?,
                    finite(head[2])?,
                    finite(head[3])?,
                ],
                score: finite(head[4])?,
                pose: Pose::from_flat(keypoints)?,
            })))
        }
        n if n % VALUES_PER_KEYPOINT == 0 => Err(Error::KeypointCount {
            expected: NUM_KEYPOINTS,
            got: n / VALUES_PER_KEYPOINT,
        }),
        n => Err(Error::RecordLength(POSE_VALUES, DETECTION_VALUES, n)),
    }
}

/// Read every record, failing on the first malformed line.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<Record>, Error> {
    let mut records = vec![];
    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(Error::ReadInput)?;
        if let Some(record) = parse_record(&line).map_err(|e| Error::Line {
            line: i + 1,
            source: Box::new(e),
        })? {
            records.push(record);
        }
    }
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::{parse_record, read_records, Record, POSE_VALUES};
    use crate::{error::Error, pose::KeypointKind};
    use std::io::Cursor;

    fn pose_line(score: f32) -> String {
        (0..17)
            .map(|i| format!("{} {} {}", i * 10, i * 20, score))
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn blank_and_comment_lines() {
        assert_eq!(parse_record("").unwrap(), None);
        assert_eq!(parse_record("   ").unwrap(), None);
        assert_eq!(parse_record("# frame 12").unwrap(), None);
    }

    #[test]
    fn bare_pose() {
        let record = parse_record(&pose_line(0.9)).unwrap().unwrap();
        let pose = match record {
            Record::Pose(pose) => pose,
            other => panic!("expected pose, got {:?}", other),
        };
        let wrist = pose[KeypointKind::LeftWrist];
        assert_eq!(wrist.point.x(), 90.0);
        assert_eq!(wrist.point.y(), 180.0);
        assert_eq!(wrist.score, 0.9);
    }

    #[test]
    fn detection_with_commas() {
        let line = format!(
            "10,20,110,220,0.87,{} # person",
            pose_line(0.6).replace(' ', ",")
        );
        match parse_record(&line).unwrap().unwrap() {
            Record::Detection(detection) => {
                assert_eq!(detection.bbox, [10.0, 20.0, 110.0, 220.0]);
                assert_eq!(detection.score, 0.87);
                assert_eq!(detection.pose.count_visible(0.5), 17);
            }
            other => panic!("expected detection, got {:?}", other),
        }
    }

    #[test]
    fn wrong_keypoint_count() {
        let values = vec!["1"; POSE_VALUES + 3].join(" ");
        assert!(matches!(
            parse_record(&values),
            Err(Error::KeypointCount { got: 18, .. })
        ));
        let values = vec!["1"; POSE_VALUES - 3].join(" ");
        assert!(matches!(
            parse_record(&values),
            Err(Error::KeypointCount { got: 16, .. })
        ));
        assert!(matches!(
            parse_record("1 2 3 4"),
            Err(Error::RecordLength(51, 56, 4))
        ));
    }

    #[test]
    fn infinite_token() {
        let line = format!("inf 0 0.9 {}", vec!["0"; POSE_VALUES - 3].join(" "));
        assert!(matches!(parse_record(&line), Err(Error::NonFinite(_))));

        let line = format!("0 0 -inf 10 0.9 {}", pose_line(0.9));
        assert!(matches!(parse_record(&line), Err(Error::NonFinite(_))));
    }

    #[test]
    fn bad_number() {
        assert!(matches!(
            parse_record("1 2 three"),
            Err(Error::ParseValue(_, ref token)) if token == "three"
        ));
    }

    #[test]
    fn reads_many() {
        let text = format!("# header\n{}\n\n{}\n", pose_line(0.9), pose_line(0.1));
        let records = read_records(Cursor::new(text)).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].pose().count_visible(0.5), 0);
    }

    #[test]
    fn reports_line_number() {
        let text = format!("{}\n1 2 3\n", pose_line(0.9));
        match read_records(Cursor::new(text)) {
            Err(Error::Line { line, .. }) => assert_eq!(line, 2),
            other => panic!("unexpected result: {:?}", other),
        }
    }
}
