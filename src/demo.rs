//! Sample drawings.

use crate::model::figures::{Circle, Ellipse, Line, Rectangle, Square, Triangle};
use crate::model::{Container, GeometryError, Node, Point};

fn line(x1: i64, y1: i64, x2: i64, y2: i64) -> Node {
    Node::figure(Line::new(Point::new(x1, y1), Point::new(x2, y2)))
}

/// A stick figure with its top-left corner at the origin.
pub fn person() -> Result<Container, GeometryError> {
    let head = Container::new(vec![Node::figure(Circle::new(20)?)], Point::new(50, 30));
    let body = Container::new(vec![Node::figure(Ellipse::new(20, 40)?)], Point::new(50, 90));
    let arm_1 = Container::new(
        vec![line(0, 0, 30, 30), line(10, 0, 10, 10), line(0, 10, 10, 10)],
        Point::new(10, 40),
    );
    let arm_2 = Container::new(
        vec![line(0, 30, 30, 0), line(20, 0, 20, 10), line(30, 10, 20, 10)],
        Point::new(60, 40),
    );
    let leg_1 = Container::new(
        vec![line(30, 0, 10, 40), line(10, 40, 0, 40)],
        Point::new(10, 120),
    );
    let leg_2 = Container::new(
        vec![line(0, 0, 20, 40), line(20, 40, 30, 40)],
        Point::new(60, 120),
    );

    Ok(Container::new(
        [head, body, arm_1, arm_2, leg_1, leg_2]
            .into_iter()
            .map(Node::from)
            .collect(),
        Point::ORIGIN,
    ))
}

/// Two stick figures side by side.
pub fn two_people() -> Result<Container, GeometryError> {
    let human = person()?;
    let human_2 = Container::new(vec![human.clone().into()], Point::new(100, 0));
    Ok(Container::new(
        vec![human.into(), human_2.into()],
        Point::ORIGIN,
    ))
}

/// A plank balanced on a triangle, with a box on each end.
pub fn seesaw() -> Result<Container, GeometryError> {
    let basement = Triangle::new(vec![Point::new(40, 20), Point::new(30, 60), Point::new(50, 60)])?;
    let plank = Rectangle::new(80, 10)?;
    let weight = Square::new(10)?;

    Ok(Container::new(
        vec![
            Node::figure(basement),
            Container::new(vec![Node::figure(plank)], Point::new(0, 10)).into(),
            Container::new(vec![Node::figure(weight.clone())], Point::ORIGIN).into(),
            Container::new(vec![Node::figure(weight)], Point::new(70, 0)).into(),
        ],
        Point::ORIGIN,
    ))
}

/// The two people next to a seesaw placed at (350, 50).
pub fn try_sample_drawing() -> Result<Container, GeometryError> {
    let mut seesaw = seesaw()?;
    seesaw.coordinates = Point::new(350, 50);
    Ok(Container::new(
        vec![two_people()?.into(), seesaw.into()],
        Point::ORIGIN,
    ))
}

/// [`try_sample_drawing`] for tests, where the fixed sizes are known valid.
#[cfg(test)]
pub fn sample_drawing() -> Container {
    try_sample_drawing().unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_person_structure() {
        let person = person().unwrap();
        assert_eq!(person.len(), 6);
        assert_eq!(person.figure_count(), 12);
    }

    #[test]
    fn test_sample_drawing_counts() {
        let drawing = sample_drawing();
        // Two people of 12 figures each plus the seesaw's 4.
        assert_eq!(drawing.figure_count(), 28);
        assert_eq!(drawing.draw_info().unwrap().len(), 28);
    }

    #[test]
    fn test_second_person_is_offset() {
        let people = two_people().unwrap();
        let first = people.items()[0].draw_info().unwrap();
        let second = people.items()[1].draw_info().unwrap();

        let offset = Point::new(100, 0);
        for (a, b) in first.into_iter().zip(second) {
            assert_eq!(a.translated(offset).unwrap(), b);
        }
    }
}
