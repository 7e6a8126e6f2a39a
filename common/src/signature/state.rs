//! 描画ステートマシン
//!
//! Idle / Drawing の2状態。状態は呼び出し側が所有し、`step` に渡して
//! 次の状態と描画コマンドを受け取る。描画面を持たずにテストできる。

use super::input::InputPhase;
use super::surface::LogicalPoint;

/// 1回の押下〜解放で描かれた点列
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SignatureStroke {
    pub points: Vec<LogicalPoint>,
}

impl SignatureStroke {
    fn starting_at(point: LogicalPoint) -> Self {
        Self {
            points: vec![point],
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn last(&self) -> Option<LogicalPoint> {
        self.points.last().copied()
    }
}

/// 描画状態
#[derive(Debug, Clone, Default, PartialEq)]
pub enum DrawState {
    #[default]
    Idle,
    Drawing {
        stroke: SignatureStroke,
    },
}

impl DrawState {
    pub fn is_drawing(&self) -> bool {
        matches!(self, DrawState::Drawing { .. })
    }
}

/// ラスタへの描画指示
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InkCommand {
    /// 押下点（丸キャップの点）
    Dot(LogicalPoint),
    Segment(LogicalPoint, LogicalPoint),
}

/// 1イベント分の遷移結果
#[derive(Debug, Clone, PartialEq)]
pub struct Transition {
    pub state: DrawState,
    pub ink: Option<InkCommand>,
    /// このイベントで確定したストローク
    pub finished: Option<SignatureStroke>,
}

/// 状態遷移
///
/// - Start: 新しいストロークを開始し押下点を描く（描画中なら前のストロークを確定）
/// - Move: 描画中のみ直前の点から線分を描く。Idle では無視
/// - End: 描画中なら確定して Idle
pub fn step(state: DrawState, phase: InputPhase, point: LogicalPoint) -> Transition {
    match (state, phase) {
        (previous, InputPhase::Start) => {
            let finished = match previous {
                DrawState::Drawing { stroke } => Some(stroke),
                DrawState::Idle => None,
            };
            Transition {
                state: DrawState::Drawing {
                    stroke: SignatureStroke::starting_at(point),
                },
                ink: Some(InkCommand::Dot(point)),
                finished,
            }
        }
        (DrawState::Drawing { mut stroke }, InputPhase::Move) => {
            let ink = stroke
                .last()
                .map(|from| InkCommand::Segment(from, point))
                .unwrap_or(InkCommand::Dot(point));
            stroke.points.push(point);
            Transition {
                state: DrawState::Drawing { stroke },
                ink: Some(ink),
                finished: None,
            }
        }
        (DrawState::Drawing { stroke }, InputPhase::End) => Transition {
            state: DrawState::Idle,
            ink: None,
            finished: Some(stroke),
        },
        (DrawState::Idle, InputPhase::Move | InputPhase::End) => Transition {
            state: DrawState::Idle,
            ink: None,
            finished: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f32, y: f32) -> LogicalPoint {
        LogicalPoint::new(x, y)
    }

    #[test]
    fn test_move_while_idle_is_ignored() {
        let t = step(DrawState::Idle, InputPhase::Move, p(1.0, 1.0));
        assert_eq!(t.state, DrawState::Idle);
        assert!(t.ink.is_none());
    }

    #[test]
    fn test_full_gesture() {
        let t = step(DrawState::Idle, InputPhase::Start, p(0.0, 0.0));
        assert!(t.state.is_drawing());
        assert_eq!(t.ink, Some(InkCommand::Dot(p(0.0, 0.0))));

        let t = step(t.state, InputPhase::Move, p(5.0, 5.0));
        assert_eq!(t.ink, Some(InkCommand::Segment(p(0.0, 0.0), p(5.0, 5.0))));

        let t = step(t.state, InputPhase::Move, p(9.0, 2.0));
        assert_eq!(t.ink, Some(InkCommand::Segment(p(5.0, 5.0), p(9.0, 2.0))));

        let t = step(t.state, InputPhase::End, p(0.0, 0.0));
        assert_eq!(t.state, DrawState::Idle);
        assert_eq!(t.finished.map(|s| s.len()), Some(3));
    }

    #[test]
    fn test_end_while_idle_is_noop() {
        let t = step(DrawState::Idle, InputPhase::End, p(3.0, 3.0));
        assert_eq!(t.state, DrawState::Idle);
        assert!(t.finished.is_none());
    }

    #[test]
    fn test_restart_finishes_previous_stroke() {
        let t = step(DrawState::Idle, InputPhase::Start, p(0.0, 0.0));
        let t = step(t.state, InputPhase::Start, p(50.0, 50.0));
        assert_eq!(t.finished.map(|s| s.len()), Some(1));
        assert_eq!(t.ink, Some(InkCommand::Dot(p(50.0, 50.0))));
    }
}
